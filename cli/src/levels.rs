use anyhow::{Context, Result, bail};
use recolor_core::LevelData;
use roxmltree::{Document, Node};

/// Reads every `<level>` of a `<levels>` document, in file order.
pub fn parse_levels(xml: &str) -> Result<Vec<LevelData>> {
    let doc = Document::parse(xml).context("Malformed level file")?;
    let root = doc.root_element();
    if !root.has_tag_name("levels") {
        bail!(
            "Expected a <levels> root element, found <{}>",
            root.tag_name().name()
        );
    }

    root.children()
        .filter(|node| node.has_tag_name("level"))
        .map(parse_level)
        .collect()
}

fn parse_level(node: Node<'_, '_>) -> Result<LevelData> {
    let at = node.document().text_pos_at(node.range().start);
    let number: u32 = attribute(node, "number")?
        .trim()
        .parse()
        .with_context(|| format!("Invalid level number at {at}"))?;
    let color = attribute(node, "color")?;
    let mechanism = attribute(node, "modifier")?;

    let level = LevelData::with_inferred_size(number, color, mechanism)
        .with_context(|| format!("Invalid level {number} at {at}"))?;
    Ok(level
        .with_solution(node.attribute("solution"))
        .with_author(node.attribute("author")))
}

fn attribute<'a>(node: Node<'a, '_>, name: &str) -> Result<&'a str> {
    node.attribute(name).with_context(|| {
        let at = node.document().text_pos_at(node.range().start);
        format!("<level> at {at} has no {name} attribute")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_COLOR: &str = "rrrrr rrrrr rrrrr rrrrr rrrrr rrrrr";
    const SMALL_MODIFIER: &str = "R0000 R0000 R0000 R0000 R0000 R0000";

    fn document(levels: &str) -> String {
        format!("<?xml version=\"1.0\" encoding=\"utf-8\" ?>\n<levels>\n{levels}\n</levels>\n")
    }

    #[test]
    fn reads_levels_in_file_order() {
        let first = format!(
            "<level number=\"4\" solution=\"A1\" author=\"ann\"\n \
             color=\"{SMALL_COLOR}\"\n modifier=\"{SMALL_MODIFIER}\"/>"
        );
        let second =
            format!("<level number=\"2\" color=\"{SMALL_COLOR}\" modifier=\"{SMALL_MODIFIER}\"/>");
        let xml = document(&format!("{first}\n{second}"));
        let levels = parse_levels(&xml).unwrap();

        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].number, 4);
        assert_eq!(levels[0].size(), (6, 5));
        assert_eq!(levels[0].solution.as_deref(), Some("A1"));
        assert_eq!(levels[0].author.as_deref(), Some("ann"));
        assert_eq!(levels[1].number, 2);
        assert_eq!(levels[1].solution, None);
    }

    #[test]
    fn missing_modifier_is_an_error() {
        let xml = document(&format!("<level number=\"1\" color=\"{SMALL_COLOR}\"/>"));
        let error = parse_levels(&xml).unwrap_err();
        assert!(error.to_string().contains("modifier"));
    }

    #[test]
    fn bad_level_number_is_an_error() {
        let xml = document(&format!(
            "<level number=\"one\" color=\"{SMALL_COLOR}\" modifier=\"{SMALL_MODIFIER}\"/>"
        ));
        assert!(parse_levels(&xml).is_err());
    }

    #[test]
    fn unknown_size_is_an_error() {
        let xml = document("<level number=\"1\" color=\"rr\" modifier=\"R0\"/>");
        assert!(parse_levels(&xml).is_err());
    }

    #[test]
    fn wrong_root_is_an_error() {
        assert!(parse_levels("<puzzles/>").is_err());
    }
}
