use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::errors::QadaError;

/// The six tracked prayer categories, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Prayer {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
    Witr,
}

impl Prayer {
    pub const ALL: [Prayer; 6] = [
        Prayer::Fajr,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
        Prayer::Witr,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Prayer::Fajr => "FAJR",
            Prayer::Dhuhr => "DHUHR",
            Prayer::Asr => "ASR",
            Prayer::Maghrib => "MAGHRIB",
            Prayer::Isha => "ISHA",
            Prayer::Witr => "WITR",
        }
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Prayer {
    type Err = QadaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Prayer::ALL
            .into_iter()
            .find(|prayer| prayer.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| QadaError::InvalidInput(format!("unknown prayer `{}`", wanted)))
    }
}

/// Total mapping from every [`Prayer`] to a value.
///
/// Serializes as a JSON object keyed by the upper-case prayer names; keys
/// missing from a stored document decode as `T::default()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", default)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct PrayerMap<T> {
    pub fajr: T,
    pub dhuhr: T,
    pub asr: T,
    pub maghrib: T,
    pub isha: T,
    pub witr: T,
}

impl<T> PrayerMap<T> {
    pub fn from_fn(mut f: impl FnMut(Prayer) -> T) -> Self {
        Self {
            fajr: f(Prayer::Fajr),
            dhuhr: f(Prayer::Dhuhr),
            asr: f(Prayer::Asr),
            maghrib: f(Prayer::Maghrib),
            isha: f(Prayer::Isha),
            witr: f(Prayer::Witr),
        }
    }

    /// Iterates entries in canonical prayer order.
    pub fn iter(&self) -> impl Iterator<Item = (Prayer, &T)> + '_ {
        Prayer::ALL.into_iter().map(move |prayer| (prayer, &self[prayer]))
    }

    pub fn map<U>(&self, mut f: impl FnMut(Prayer, &T) -> U) -> PrayerMap<U> {
        PrayerMap::from_fn(|prayer| f(prayer, &self[prayer]))
    }
}

impl<T: Clone> PrayerMap<T> {
    pub fn splat(value: T) -> Self {
        Self::from_fn(|_| value.clone())
    }
}

impl PrayerMap<u64> {
    pub fn sum(&self) -> u64 {
        self.iter().fold(0u64, |acc, (_, value)| acc.saturating_add(*value))
    }
}

impl<T> Index<Prayer> for PrayerMap<T> {
    type Output = T;

    fn index(&self, prayer: Prayer) -> &T {
        match prayer {
            Prayer::Fajr => &self.fajr,
            Prayer::Dhuhr => &self.dhuhr,
            Prayer::Asr => &self.asr,
            Prayer::Maghrib => &self.maghrib,
            Prayer::Isha => &self.isha,
            Prayer::Witr => &self.witr,
        }
    }
}

impl<T> IndexMut<Prayer> for PrayerMap<T> {
    fn index_mut(&mut self, prayer: Prayer) -> &mut T {
        match prayer {
            Prayer::Fajr => &mut self.fajr,
            Prayer::Dhuhr => &mut self.dhuhr,
            Prayer::Asr => &mut self.asr,
            Prayer::Maghrib => &mut self.maghrib,
            Prayer::Isha => &mut self.isha,
            Prayer::Witr => &mut self.witr,
        }
    }
}
