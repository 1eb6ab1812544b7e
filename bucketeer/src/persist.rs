//! The persisted form of a bucket.
//!
//! A bucket is written as
//! `{"kind": {"type": .., ..}, "count": n, "hasRange": bool, "min": x, "max": y}`.
//! Infinite bounds are never written: a missing `min` means `-inf` and a
//! missing `max` means `+inf`. Likewise a fixed bucket whose threshold is
//! `+inf` carries no `threshold` field.

use crate::{Bucket, Kind};
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{self, Serialize, SerializeStruct, Serializer};

impl Serialize for Kind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Kind", 2)?;
        match *self {
            Kind::Fixed(threshold) => {
                state.serialize_field("type", "fixed")?;
                if threshold == f64::INFINITY {
                    state.skip_field("threshold")?;
                } else if threshold == f64::NEG_INFINITY {
                    return Err(ser::Error::custom("fixed threshold of -inf cannot be persisted"));
                } else {
                    state.serialize_field("threshold", &threshold)?;
                }
            }
            Kind::Percentile(percentile) => {
                state.serialize_field("type", "percentile")?;
                state.serialize_field("percentile", &percentile)?;
            }
            Kind::Uniform(index) => {
                state.serialize_field("type", "uniform")?;
                state.serialize_field("index", &index)?;
            }
        }
        state.end()
    }
}

#[derive(serde::Deserialize)]
struct RawKind {
    #[serde(rename = "type")]
    kind: String,
    threshold: Option<f64>,
    percentile: Option<f64>,
    index: Option<usize>,
}

impl<'de> Deserialize<'de> for Kind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawKind::deserialize(deserializer)?;
        match raw.kind.as_str() {
            "fixed" => Ok(Kind::Fixed(raw.threshold.unwrap_or(f64::INFINITY))),
            "percentile" => raw
                .percentile
                .map(Kind::Percentile)
                .ok_or_else(|| de::Error::missing_field("percentile")),
            "uniform" => raw
                .index
                .map(Kind::Uniform)
                .ok_or_else(|| de::Error::missing_field("index")),
            other => Err(de::Error::custom(format_args!(
                "data corrupted: invalid bucket kind type `{other}`"
            ))),
        }
    }
}

impl Serialize for Bucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Bucket", 5)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("count", &self.count)?;

        match &self.range {
            Some(range) => {
                if range.start == f64::INFINITY || range.end == f64::NEG_INFINITY {
                    return Err(ser::Error::custom("bucket range bound cannot be persisted"));
                }

                state.serialize_field("hasRange", &true)?;
                if range.start == f64::NEG_INFINITY {
                    state.skip_field("min")?;
                } else {
                    state.serialize_field("min", &range.start)?;
                }
                if range.end == f64::INFINITY {
                    state.skip_field("max")?;
                } else {
                    state.serialize_field("max", &range.end)?;
                }
            }
            None => {
                state.serialize_field("hasRange", &false)?;
                state.skip_field("min")?;
                state.skip_field("max")?;
            }
        }

        state.end()
    }
}

#[derive(serde::Deserialize)]
struct RawBucket {
    kind: Kind,
    count: u64,
    #[serde(rename = "hasRange")]
    has_range: bool,
    min: Option<f64>,
    max: Option<f64>,
}

impl<'de> Deserialize<'de> for Bucket {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawBucket::deserialize(deserializer)?;
        let range = if raw.has_range {
            Some(raw.min.unwrap_or(f64::NEG_INFINITY)..raw.max.unwrap_or(f64::INFINITY))
        } else {
            None
        };

        Ok(Bucket {
            kind: raw.kind,
            range,
            count: raw.count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const INF: f64 = f64::INFINITY;

    #[test]
    fn kind_encoding() {
        assert_eq!(
            serde_json::to_value(Kind::Fixed(1000.0)).unwrap(),
            json!({"type": "fixed", "threshold": 1000.0})
        );
        assert_eq!(
            serde_json::to_value(Kind::Fixed(INF)).unwrap(),
            json!({"type": "fixed"})
        );
        assert_eq!(
            serde_json::to_value(Kind::Percentile(0.9)).unwrap(),
            json!({"type": "percentile", "percentile": 0.9})
        );
        assert_eq!(
            serde_json::to_value(Kind::Uniform(2)).unwrap(),
            json!({"type": "uniform", "index": 2})
        );
    }

    #[test]
    fn bucket_encoding() {
        let bucket = Bucket::new(Kind::Fixed(2500.0), Some(1000.0..2500.0), 2);
        assert_eq!(
            serde_json::to_value(&bucket).unwrap(),
            json!({
                "kind": {"type": "fixed", "threshold": 2500.0},
                "count": 2,
                "hasRange": true,
                "min": 1000.0,
                "max": 2500.0
            })
        );

        let bucket = Bucket::new(Kind::Uniform(0), Some(-INF..INF), 7);
        assert_eq!(
            serde_json::to_value(&bucket).unwrap(),
            json!({"kind": {"type": "uniform", "index": 0}, "count": 7, "hasRange": true})
        );

        let bucket = Bucket::new(Kind::Uniform(1), None, 0);
        assert_eq!(
            serde_json::to_value(&bucket).unwrap(),
            json!({"kind": {"type": "uniform", "index": 1}, "count": 0, "hasRange": false})
        );
    }

    #[test]
    fn decode_sentinels() {
        let bucket: Bucket = serde_json::from_value(json!({
            "kind": {"type": "fixed"},
            "count": 1,
            "hasRange": true,
            "min": 10000.0
        }))
        .unwrap();
        assert_eq!(bucket, Bucket::new(Kind::Fixed(INF), Some(10000.0..INF), 1));

        let bucket: Bucket = serde_json::from_value(json!({
            "kind": {"type": "percentile", "percentile": 0.5},
            "count": 3,
            "hasRange": true,
            "max": 4000.0
        }))
        .unwrap();
        assert_eq!(
            bucket,
            Bucket::new(Kind::Percentile(0.5), Some(-INF..4000.0), 3)
        );

        // bounds are ignored without a range
        let bucket: Bucket = serde_json::from_value(json!({
            "kind": {"type": "uniform", "index": 0},
            "count": 0,
            "hasRange": false,
            "min": 1.0
        }))
        .unwrap();
        assert_eq!(bucket.range(), None);
    }

    #[test]
    fn corrupted_kind() {
        let error = serde_json::from_value::<Bucket>(json!({
            "kind": {"type": "linear"},
            "count": 0,
            "hasRange": false
        }))
        .unwrap_err();
        assert!(error.to_string().contains("data corrupted"));
        assert!(error.to_string().contains("linear"));

        assert!(serde_json::from_value::<Kind>(json!({"type": "uniform"})).is_err());
        assert!(serde_json::from_value::<Kind>(json!({"threshold": 1.0})).is_err());
    }

    #[test]
    fn unpersistable_bounds() {
        let bucket = Bucket::new(Kind::Percentile(0.75), Some(-INF..-INF), 0);
        assert!(serde_json::to_string(&bucket).is_err());

        assert!(serde_json::to_string(&Kind::Fixed(-INF)).is_err());
    }
}
