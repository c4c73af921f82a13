use super::filter::Bound;
use crate::error::{Error, Result};
use crate::model::{Attribute, Field};

/// One validated configuration step.
///
/// Produced from a `key=value` pair such as `min_ground_speed=12`,
/// `sort_score=-1`, `weight_acceleration=1.5`, `rank_miniturbo=1` or
/// `limit=10`. Parsing never touches query state, so a rejected directive
/// leaves the query exactly as it was.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    Filter { field: Field, bound: Bound, value: f64 },
    Sort { field: Field, descending: bool },
    ClearSort,
    Weight { attribute: Attribute, value: f64 },
    Rank { attribute: Attribute, enabled: bool },
    Limit(Option<usize>),
}

impl Directive {
    /// Parse a directive key with an optional value.
    ///
    /// An absent value, an empty value and `none` all mean "unset"; only
    /// `sort` and `limit` accept that.
    pub fn parse(key: &str, value: Option<&str>) -> Result<Self> {
        let key = key.trim();
        let typed = value.map(str::trim);
        let value = typed.filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("none"));

        match key {
            "limit" => return parse_limit(value),
            "sort" => {
                return match value {
                    None => Ok(Directive::ClearSort),
                    Some(v) => Err(Error::InvalidDirection {
                        directive: key.to_string(),
                        value: v.to_string(),
                    }),
                }
            }
            _ => {}
        }

        let (prefix, name) = key
            .split_once('_')
            .ok_or_else(|| Error::UnknownDirective(key.to_string()))?;
        // Errors echo what was typed, including an unset `none`.
        let raw = typed.unwrap_or("");

        match prefix {
            "min" | "max" => {
                let field = parse_field(key, name)?;
                let value =
                    value
                        .and_then(parse_number)
                        .ok_or_else(|| Error::InvalidFilterValue {
                            directive: key.to_string(),
                            value: raw.to_string(),
                        })?;
                let bound = if prefix == "min" { Bound::Min } else { Bound::Max };
                Ok(Directive::Filter { field, bound, value })
            }
            "sort" => {
                let field = parse_field(key, name)?;
                let descending = match value {
                    Some("1" | "+1") => false,
                    Some("-1") => true,
                    _ => {
                        return Err(Error::InvalidDirection {
                            directive: key.to_string(),
                            value: raw.to_string(),
                        })
                    }
                };
                Ok(Directive::Sort { field, descending })
            }
            "weight" => {
                let attribute = parse_attribute(key, name)?;
                let value = value
                    .and_then(parse_number)
                    .filter(|w| *w >= 0.0)
                    .ok_or_else(|| Error::InvalidWeight {
                        directive: key.to_string(),
                        value: raw.to_string(),
                    })?;
                Ok(Directive::Weight { attribute, value })
            }
            "rank" => {
                let attribute = parse_attribute(key, name)?;
                let enabled = match value {
                    Some("0") => false,
                    Some("1") => true,
                    _ => {
                        return Err(Error::InvalidFlag {
                            directive: key.to_string(),
                            value: raw.to_string(),
                        })
                    }
                };
                Ok(Directive::Rank { attribute, enabled })
            }
            _ => Err(Error::UnknownDirective(key.to_string())),
        }
    }

    /// Parse `key=value`, or a bare `key` for the unset forms.
    pub fn parse_pair(pair: &str) -> Result<Self> {
        match pair.split_once('=') {
            Some((key, value)) => Self::parse(key, Some(value)),
            None => Self::parse(pair, None),
        }
    }
}

fn parse_limit(value: Option<&str>) -> Result<Directive> {
    match value {
        None => Ok(Directive::Limit(None)),
        Some(v) => v
            .parse::<usize>()
            .map(|n| Directive::Limit(Some(n)))
            .map_err(|_| Error::InvalidLimit(v.to_string())),
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_field(key: &str, name: &str) -> Result<Field> {
    Field::parse(name).ok_or_else(|| Error::UnknownAttribute {
        directive: key.to_string(),
        attribute: name.to_string(),
    })
}

// Weights and ranking flags only apply to raw stats, never to score or score_dev.
fn parse_attribute(key: &str, name: &str) -> Result<Attribute> {
    Attribute::parse(name).ok_or_else(|| Error::UnknownAttribute {
        directive: key.to_string(),
        attribute: name.to_string(),
    })
}
