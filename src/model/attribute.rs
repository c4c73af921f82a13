use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Index, IndexMut};

/// Shared stat schema of every component and build.
///
/// The order of the variants is the canonical column order used by storage
/// and output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Attribute {
    GroundSpeed,
    WaterSpeed,
    AirSpeed,
    AntigravitySpeed,
    Acceleration,
    Weight,
    GroundHandling,
    WaterHandling,
    AirHandling,
    AntigravityHandling,
    Miniturbo,
    OnRoadTraction,
    OffRoadTraction,
    Invincibility,
}

pub const ATTRIBUTE_COUNT: usize = 14;

impl Attribute {
    pub const ALL: [Attribute; ATTRIBUTE_COUNT] = [
        Attribute::GroundSpeed,
        Attribute::WaterSpeed,
        Attribute::AirSpeed,
        Attribute::AntigravitySpeed,
        Attribute::Acceleration,
        Attribute::Weight,
        Attribute::GroundHandling,
        Attribute::WaterHandling,
        Attribute::AirHandling,
        Attribute::AntigravityHandling,
        Attribute::Miniturbo,
        Attribute::OnRoadTraction,
        Attribute::OffRoadTraction,
        Attribute::Invincibility,
    ];

    /// Column and directive name.
    pub fn as_str(self) -> &'static str {
        match self {
            Attribute::GroundSpeed => "ground_speed",
            Attribute::WaterSpeed => "water_speed",
            Attribute::AirSpeed => "air_speed",
            Attribute::AntigravitySpeed => "antigravity_speed",
            Attribute::Acceleration => "acceleration",
            Attribute::Weight => "weight",
            Attribute::GroundHandling => "ground_handling",
            Attribute::WaterHandling => "water_handling",
            Attribute::AirHandling => "air_handling",
            Attribute::AntigravityHandling => "antigravity_handling",
            Attribute::Miniturbo => "miniturbo",
            Attribute::OnRoadTraction => "on_road_traction",
            Attribute::OffRoadTraction => "off_road_traction",
            Attribute::Invincibility => "invincibility",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.as_str() == name)
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything a filter or sort directive can target: a raw stat, or one of
/// the values derived from the weight vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Stat(Attribute),
    Score,
    ScoreDev,
}

impl Field {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "score" => Some(Field::Score),
            "score_dev" => Some(Field::ScoreDev),
            other => Attribute::parse(other).map(Field::Stat),
        }
    }

    /// Every field in output order: derived values first, then stats.
    pub fn all() -> impl Iterator<Item = Field> {
        [Field::Score, Field::ScoreDev]
            .into_iter()
            .chain(Attribute::ALL.into_iter().map(Field::Stat))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Stat(a) => a.as_str(),
            Field::Score => "score",
            Field::ScoreDev => "score_dev",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed-schema stat vector. Absent values are zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Stats([f64; ATTRIBUTE_COUNT]);

impl Stats {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Attribute, f64)>,
    {
        let mut stats = Self::zero();
        for (attribute, value) in pairs {
            stats[attribute] = value;
        }
        stats
    }

    pub fn get(&self, attribute: Attribute) -> f64 {
        self.0[attribute.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, f64)> + '_ {
        Attribute::ALL.iter().map(move |a| (*a, self.get(*a)))
    }
}

impl Index<Attribute> for Stats {
    type Output = f64;

    fn index(&self, attribute: Attribute) -> &f64 {
        &self.0[attribute.index()]
    }
}

impl IndexMut<Attribute> for Stats {
    fn index_mut(&mut self, attribute: Attribute) -> &mut f64 {
        &mut self.0[attribute.index()]
    }
}

impl Add for Stats {
    type Output = Stats;

    fn add(self, other: Stats) -> Stats {
        let mut sum = self;
        for attribute in Attribute::ALL {
            sum[attribute] += other[attribute];
        }
        sum
    }
}

// Serialized as a flat map keyed by column name so it can be flattened into
// output records.
impl Serialize for Stats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ATTRIBUTE_COUNT))?;
        for (attribute, value) in self.iter() {
            map.serialize_entry(attribute.as_str(), &value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_names_roundtrip() {
        for attribute in Attribute::ALL {
            assert_eq!(Attribute::parse(attribute.as_str()), Some(attribute));
        }
        assert_eq!(Attribute::parse("speed"), None);
    }

    #[test]
    fn test_attribute_index_matches_canonical_order() {
        for (i, attribute) in Attribute::ALL.iter().enumerate() {
            assert_eq!(attribute.index(), i);
        }
    }

    #[test]
    fn test_field_parse_derived() {
        assert_eq!(Field::parse("score"), Some(Field::Score));
        assert_eq!(Field::parse("score_dev"), Some(Field::ScoreDev));
        assert_eq!(
            Field::parse("miniturbo"),
            Some(Field::Stat(Attribute::Miniturbo))
        );
        assert_eq!(Field::parse("driver_id"), None);
    }

    #[test]
    fn test_stats_default_to_zero() {
        let stats = Stats::from_pairs([(Attribute::Weight, 4.0)]);
        assert_eq!(stats[Attribute::Weight], 4.0);
        assert_eq!(stats[Attribute::Acceleration], 0.0);
    }

    #[test]
    fn test_stats_add_elementwise() {
        let a = Stats::from_pairs([(Attribute::GroundSpeed, 2.0), (Attribute::Weight, 1.0)]);
        let b = Stats::from_pairs([(Attribute::GroundSpeed, 3.0), (Attribute::Miniturbo, 5.0)]);
        let sum = a + b;
        assert_eq!(sum[Attribute::GroundSpeed], 5.0);
        assert_eq!(sum[Attribute::Weight], 1.0);
        assert_eq!(sum[Attribute::Miniturbo], 5.0);
    }

    #[test]
    fn test_stats_serialize_as_flat_map() {
        let stats = Stats::from_pairs([(Attribute::AirSpeed, 7.0)]);
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["air_speed"], 7.0);
        assert_eq!(json.as_object().unwrap().len(), ATTRIBUTE_COUNT);
    }
}
