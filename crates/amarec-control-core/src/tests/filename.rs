use super::fakes::at;
use crate::{FilenameTemplate, Labels};

use std::path::Path;

fn labels() -> Labels {
    Labels {
        stage: "Stage1".to_string(),
        rule: "Rule1".to_string(),
        won: "win".to_string(),
    }
}

/// WHAT: Default template yields the documented filename
/// WHY: Downstream tooling sorts and greps on this exact shape
#[test]
fn given_default_template_when_rendering_then_matches_documented_name() {
    // Given: Default template, fixed clock and labels
    let template = FilenameTemplate::default();
    let now = at(2015, 8, 1, 12, 34, 56);

    // When: Building the destination path
    let path = template.destination_path(Path::new(""), &now, &labels());

    // Then: Exact filename
    assert_eq!(path, Path::new("20150801_1234_Stage1_Rule1_win.avi"));
}

/// WHAT: Every calendar field is zero-padded to its width
/// WHY: Single-digit months and hours must not shift the layout
#[test]
fn given_all_placeholders_when_rendering_then_fields_zero_padded() {
    // Given: A template using every placeholder
    let template = FilenameTemplate::new(
        "%year%-%month%-%date% %hour%.%minutes%.%second% %stage%/%rule%/%won%",
    );
    let now = at(987, 1, 2, 3, 4, 5);

    // When: Rendering
    let name = template.render(&now, &labels());

    // Then: Year 4 digits, others 2
    assert_eq!(name, "0987-01-02 03.04.05 Stage1/Rule1/win");
}

/// WHAT: Unset labels render as empty strings
/// WHY: Missing environment values are lenient by choice
#[test]
fn given_empty_labels_when_rendering_then_placeholders_vanish() {
    let template = FilenameTemplate::default();
    let now = at(2015, 8, 1, 12, 34, 56);

    let name = template.render(&now, &Labels::default());

    assert_eq!(name, "20150801_1234___.avi");
}

/// WHAT: Destination always ends in .avi
/// WHY: The recorder only produces AVI and players rely on the extension
#[test]
fn given_templates_with_other_endings_when_building_path_then_extension_forced() {
    let now = at(2015, 8, 1, 12, 34, 56);
    let dir = Path::new("videos");

    for raw in ["%won%", "%won%.mp4", "%won%.", "%won%.avi"] {
        // When: Building the path for each template
        let path = FilenameTemplate::new(raw).destination_path(dir, &now, &labels());

        // Then: Extension is .avi and the directory is preserved
        assert_eq!(
            path.extension().and_then(|e| e.to_str()),
            Some("avi"),
            "template {raw:?}"
        );
        assert_eq!(path.parent(), Some(dir), "template {raw:?}");
        assert!(
            path.to_string_lossy().ends_with("win.avi"),
            "template {raw:?} gave {path:?}"
        );
    }
}

/// WHAT: Degenerate renders still land inside the directory as .avi files
/// WHY: Empty labels must never move a recording out of the destination
#[test]
fn given_empty_or_dot_renders_when_building_path_then_avi_inside_directory() {
    let now = at(2015, 8, 1, 12, 34, 56);
    let dir = Path::new("videos");

    for (raw, expected) in [
        ("%stage%", ".avi"),
        ("", ".avi"),
        (".", "..avi"),
        ("..", "...avi"),
    ] {
        // When: Building the path with every label empty
        let path = FilenameTemplate::new(raw).destination_path(dir, &now, &Labels::default());

        // Then: A single .avi entry directly under the directory
        assert_eq!(path, dir.join(expected), "template {raw:?}");
        assert_eq!(path.parent(), Some(dir), "template {raw:?}");
        assert!(path.to_string_lossy().ends_with(".avi"), "template {raw:?}");
    }
}

/// WHAT: Literal text outside placeholders is kept verbatim
/// WHY: Users prefix recordings with their own tags
#[test]
fn given_literal_text_when_rendering_then_preserved() {
    let template = FilenameTemplate::new("splatoon %stage% 100%");
    let name = template.render(&at(2015, 8, 1, 0, 0, 0), &labels());
    assert_eq!(name, "splatoon Stage1 100%");
}
