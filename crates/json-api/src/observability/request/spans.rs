//! Route templates for span names and metric labels.

use uuid::Uuid;

/// Replace id-like path segments so every QR code shares one label.
pub(super) fn route_template(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| {
            if is_numeric_id(segment) {
                "{id}"
            } else if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

fn is_numeric_id(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|byte| byte.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_path_is_unchanged() {
        assert_eq!(route_template("/"), "/");
    }

    #[test]
    fn numeric_ids_are_collapsed() {
        assert_eq!(route_template("/qrcodes/42"), "/qrcodes/{id}");
        assert_eq!(route_template("/qrcodes/7/scan"), "/qrcodes/{id}/scan");
    }

    #[test]
    fn draft_segment_is_kept() {
        assert_eq!(route_template("/qrcodes/new"), "/qrcodes/new");
    }

    #[test]
    fn uuids_are_collapsed() {
        assert_eq!(
            route_template("/sessions/0190b2c4-7d1e-7c3a-9f00-1234567890ab"),
            "/sessions/{uuid}"
        );
    }
}
