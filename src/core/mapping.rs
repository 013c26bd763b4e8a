//! Container id → record field mapping.
//!
//! Several button boxes can feed a single record field: the primary,
//! secondary and tertiary aroma boxes all write to `profumo_<suffix>`. When a
//! saved record is shown again, each box has to find the field it belongs
//! to so it can highlight the matching buttons.

use crate::domain::schema::CONTAINER_SUFFIX;

/// Sub-category tokens that mark a composite container.
pub const COMPOSITE_MARKERS: [&str; 3] = ["primari", "secondari", "terzari"];

/// Maps a container id to the canonical record field it represents.
///
/// ```
/// use tasting_core::core::mapping::canonical_field_name;
///
/// assert_eq!(canonical_field_name("profumo_primari_rosso_box"), "profumo_rosso");
/// assert_eq!(canonical_field_name("limpidezza_rosso_box"), "limpidezza_rosso");
/// ```
pub fn canonical_field_name(container_id: &str) -> String {
    let derived = container_id
        .strip_suffix(CONTAINER_SUFFIX)
        .unwrap_or(container_id);

    let segments: Vec<&str> = derived.split('_').collect();
    let is_composite = segments
        .iter()
        .any(|segment| COMPOSITE_MARKERS.contains(segment));

    match (is_composite, segments.first(), segments.last()) {
        (true, Some(first), Some(last)) if segments.len() > 2 => format!("{first}_{last}"),
        _ => derived.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{schema::containers, FormStep, WineCategory};

    #[test]
    fn composite_containers_collapse_to_their_field() {
        assert_eq!(canonical_field_name("profumo_primari_rosso_box"), "profumo_rosso");
        assert_eq!(canonical_field_name("sapore_terzari_bianco_box"), "sapore_bianco");
        assert_eq!(canonical_field_name("profumo_secondari_rosato_box"), "profumo_rosato");
    }

    #[test]
    fn plain_containers_only_lose_their_suffix() {
        assert_eq!(canonical_field_name("limpidezza_rosso_box"), "limpidezza_rosso");
        assert_eq!(
            canonical_field_name("intensita_vista_rosso_box"),
            "intensita_vista_rosso"
        );
        assert_eq!(canonical_field_name("qualita_bianco"), "qualita_bianco");
    }

    #[test]
    fn mapping_is_deterministic() {
        let first = canonical_field_name("sapore_primari_rosso_box");
        let second = canonical_field_name("sapore_primari_rosso_box");
        assert_eq!(first, second);
    }

    #[test]
    fn mapping_agrees_with_schema_for_every_container() {
        for category in WineCategory::ALL {
            for step in FormStep::ALL {
                for spec in containers(step, category) {
                    assert_eq!(
                        canonical_field_name(&spec.container_id),
                        spec.field,
                        "container {}",
                        spec.container_id
                    );
                }
            }
        }
    }
}
