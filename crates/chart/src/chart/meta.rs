use serde::Deserialize;
use serde::Serialize;
use tornado_analyze::Dimension;
use tornado_analyze::DimensionCollection;
use tornado_analyze::DimensionKey;

use crate::mode::ComparisonMode;

const TOOLTIP_SEPARATOR: &str = ", ";

/// Metadata attached to every chart entry.
///
/// `explore` lists the dimension values that were traversed to reach the
/// entry, outermost first. The client uses it to open a new worksheet
/// filtered down to a clicked bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryMeta {
    pub tooltip: String,
    pub mode: ComparisonMode,
    pub explore: Vec<ExploreFilter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExploreFilter {
    pub target: String,
    pub value: String,
}

impl EntryMeta {
    /// Builds the metadata for an entry reached through `path`.
    ///
    /// `dimensions` must be in the nesting order of the walked data; it
    /// resolves display names and stands in for keys that carry no dimension.
    pub fn new(
        mode: ComparisonMode,
        path: &[DimensionKey],
        dimensions: &DimensionCollection,
    ) -> EntryMeta {
        let mut tooltip: Vec<String> = Vec::with_capacity(path.len());
        let mut explore: Vec<ExploreFilter> = Vec::with_capacity(path.len());

        for (level, key) in path.iter().enumerate() {
            let dimension = if key.dimension().is_empty() {
                dimensions.get(level)
            } else {
                dimensions.find(key.dimension())
            };

            let target = dimension.map_or(key.dimension(), Dimension::target);
            let hint = match dimension {
                Some(dimension) => format!("{}: {}", dimension.display_name(), key.strip()),
                None if !target.is_empty() => format!("{target}: {}", key.strip()),
                None => key.strip().to_owned(),
            };

            tooltip.push(hint);
            explore.push(ExploreFilter {
                target: target.to_owned(),
                value: key.strip().to_owned(),
            });
        }

        Self {
            tooltip: tooltip.join(TOOLTIP_SEPARATOR),
            mode,
            explore,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn dimensions() -> DimensionCollection {
        DimensionCollection::from_iter([
            Dimension::new("fb.author.gender").with_label("Gender"),
            Dimension::new("fb.author.age"),
        ])
    }

    #[test]
    fn describes_the_traversed_path() {
        let path = [
            DimensionKey::parse("fb.author.gender:female"),
            DimensionKey::parse("fb.author.age:18-24"),
        ];

        let meta = EntryMeta::new(ComparisonMode::Baseline, &path, &dimensions());

        assert_eq!(meta.tooltip, "Gender: female, fb.author.age: 18-24");
        assert_eq!(meta.mode, ComparisonMode::Baseline);
        assert_eq!(
            meta.explore,
            vec![
                ExploreFilter {
                    target: String::from("fb.author.gender"),
                    value: String::from("female"),
                },
                ExploreFilter {
                    target: String::from("fb.author.age"),
                    value: String::from("18-24"),
                },
            ]
        );
    }

    #[test]
    fn keys_without_dimension_take_it_from_their_level() {
        let path = [DimensionKey::parse("female"), DimensionKey::parse("18-24")];

        let meta = EntryMeta::new(ComparisonMode::Compare, &path, &dimensions());

        assert_eq!(meta.explore[1].target, "fb.author.age");
        assert_eq!(meta.tooltip, "Gender: female, fb.author.age: 18-24");
    }

    #[test]
    fn round_trips_through_json() {
        let path = [DimensionKey::parse("fb.author.gender:male")];
        let meta = EntryMeta::new(ComparisonMode::Compare, &path, &dimensions());

        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(
            value,
            json!({
                "tooltip": "Gender: male",
                "mode": "compare",
                "explore": [{"target": "fb.author.gender", "value": "male"}]
            })
        );

        let decoded: EntryMeta = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, meta);
    }
}
