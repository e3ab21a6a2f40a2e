//! Four-transformation (四化) aggregation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chart::NatalChart;
use crate::star::{Mutagen, Star};

/// Every mutagen-tagged star in a chart, bucketed by transformation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SihuaDisplay {
    pub lu: Vec<Star>,
    pub quan: Vec<Star>,
    pub ke: Vec<Star>,
    pub ji: Vec<Star>,
}

impl SihuaDisplay {
    /// Bucket for one transformation.
    pub fn bucket(&self, mutagen: Mutagen) -> &[Star] {
        match mutagen {
            Mutagen::Lu => &self.lu,
            Mutagen::Quan => &self.quan,
            Mutagen::Ke => &self.ke,
            Mutagen::Ji => &self.ji,
        }
    }

    fn bucket_mut(&mut self, mutagen: Mutagen) -> &mut Vec<Star> {
        match mutagen {
            Mutagen::Lu => &mut self.lu,
            Mutagen::Quan => &mut self.quan,
            Mutagen::Ke => &mut self.ke,
            Mutagen::Ji => &mut self.ji,
        }
    }

    /// Bucket sizes in 禄, 权, 科, 忌 order.
    pub fn counts(&self) -> [usize; 4] {
        [self.lu.len(), self.quan.len(), self.ke.len(), self.ji.len()]
    }

    pub fn total(&self) -> usize {
        self.counts().iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn balance(&self) -> SihuaBalance {
        SihuaBalance::from_counts(self.counts())
    }
}

/// Overall verdict on how the four transformations are spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SihuaBalance {
    /// No transformed stars at all.
    Empty,
    /// Largest and smallest bucket differ by at most one.
    Balanced,
    /// 忌 outnumbers the other three combined.
    JiHeavy,
    /// 禄 outnumbers the other three combined.
    LuRich,
    Skewed,
}

impl SihuaBalance {
    /// Verdict for bucket sizes in 禄, 权, 科, 忌 order. Rules are checked
    /// in declaration order.
    pub fn from_counts(counts: [usize; 4]) -> Self {
        let [lu, quan, ke, ji] = counts;
        let total = lu + quan + ke + ji;
        if total == 0 {
            return Self::Empty;
        }
        let max = counts.iter().copied().max().unwrap_or(0);
        let min = counts.iter().copied().min().unwrap_or(0);
        if max - min <= 1 {
            Self::Balanced
        } else if ji > lu + quan + ke {
            Self::JiHeavy
        } else if lu > quan + ke + ji {
            Self::LuRich
        } else {
            Self::Skewed
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Balanced => "balanced",
            Self::JiHeavy => "ji_heavy",
            Self::LuRich => "lu_rich",
            Self::Skewed => "skewed",
        }
    }

    /// Reader-facing comment.
    pub const fn comment(self) -> &'static str {
        match self {
            Self::Empty => "暂无四化星",
            Self::Balanced => "四化分布均衡",
            Self::JiHeavy => "忌星偏多，需注意化解",
            Self::LuRich => "禄星丰富，财运较佳",
            Self::Skewed => "四化分布有偏，需综合分析",
        }
    }
}

/// Partition every mutagen-tagged star across all palaces.
///
/// Palaces are walked in chart order and stars in major, minor, adjective
/// order, so bucket contents are stable for a given chart.
pub fn sihua_display(chart: &NatalChart) -> SihuaDisplay {
    let mut out = SihuaDisplay::default();
    for (_, star) in chart.stars() {
        if let Some(m) = star.mutagen {
            out.bucket_mut(m).push(star.clone());
        }
    }
    debug!(counts = ?out.counts(), "sihua aggregated");
    out
}
