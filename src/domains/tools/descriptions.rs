//! Description cycling.

use super::definition::ToolDefinition;

/// What the display should show after a fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayText<'a> {
    Show(&'a str),
    Clear,
}

/// Produce the next description of `definition` and the advanced cursor.
///
/// A `null` entry yields [`DisplayText::Clear`]. No descriptions at all
/// yields `None` and leaves the cursor alone.
pub fn next(definition: &ToolDefinition, cursor: usize) -> (Option<DisplayText<'_>>, usize) {
    let descriptions = &definition.descriptions;
    if descriptions.is_empty() {
        return (None, cursor);
    }

    let index = cursor % descriptions.len();
    let text = match descriptions[index].as_deref() {
        Some(text) => DisplayText::Show(text),
        None => DisplayText::Clear,
    };
    (Some(text), (index + 1) % descriptions.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool(descriptions: Vec<Option<&str>>) -> ToolDefinition {
        let mut def = ToolDefinition::new("Paint");
        def.descriptions = descriptions
            .into_iter()
            .map(|d| d.map(str::to_string))
            .collect();
        def
    }

    #[test]
    fn test_empty_descriptions_yield_nothing() {
        let def = tool(vec![]);
        assert_eq!(next(&def, 0), (None, 0));
        assert_eq!(next(&def, 4), (None, 4));
    }

    #[test]
    fn test_none_marker_clears() {
        let def = tool(vec![None, Some("Paint some more stuff")]);
        let (first, cursor) = next(&def, 0);
        let (second, cursor) = next(&def, cursor);
        let (third, _) = next(&def, cursor);
        assert_eq!(first, Some(DisplayText::Clear));
        assert_eq!(second, Some(DisplayText::Show("Paint some more stuff")));
        assert_eq!(third, Some(DisplayText::Clear));
    }

    #[test]
    fn test_sequence_repeats_after_full_cycle() {
        let def = tool(vec![Some("one"), Some("two"), None, Some("four")]);
        let len = def.descriptions.len();

        let mut cursor = 0;
        let mut seen = Vec::new();
        for _ in 0..len * 3 {
            let (text, next_cursor) = next(&def, cursor);
            seen.push(text.unwrap());
            cursor = next_cursor;
        }

        assert_eq!(seen[..len], seen[len..len * 2]);
        assert_eq!(seen[..len], seen[len * 2..]);
        assert_eq!(cursor, 0);
    }
}
