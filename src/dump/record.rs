// Primitives for reading values out of an item record.

use crate::dump::NOT_AVAILABLE;

/// A read-only element of an item document.
///
/// The accessors below only rely on this view of the tree. All the lookups are done
/// among the descendants of the node, in document order.
pub trait RecordNode: Copy {
    fn attr(&self, name: &str) -> Option<&str>;

    /// All the text below this node, concatenated.
    fn inner_text(&self) -> String;

    fn find_all(&self, tag: &str) -> Vec<Self>;

    fn find_first(&self, tag: &str) -> Option<Self> {
        self.find_all(tag).into_iter().next()
    }
}

/// The value carried by an element.
///
/// The same property is written either as `<tag value="..."/>` or as `<tag>...</tag>`
/// depending on the vintage of the document. The attribute wins when it is not empty.
pub fn node_value<N: RecordNode>(node: &N) -> Option<String> {
    let raw = match node.attr("value") {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => node.inner_text(),
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn join_or_missing(values: Vec<String>) -> String {
    if values.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        values.join("; ")
    }
}

/// The value of the first `tag` element, or the placeholder.
pub fn find_tag_value<N: RecordNode>(node: N, tag: &str) -> String {
    node.find_first(tag)
        .and_then(|n| node_value(&n))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// The values of all the `tag` elements, joined with `"; "`.
pub fn join_tag_values<N: RecordNode>(node: N, tag: &str) -> String {
    let values: Vec<String> = node
        .find_all(tag)
        .iter()
        .filter_map(|n| node_value(n))
        .collect();
    join_or_missing(values)
}

/// The values of the `<link>` elements of the given type (compared without case),
/// joined with `"; "`.
pub fn extract_link_values<N: RecordNode>(node: N, link_type: &str) -> String {
    let values: Vec<String> = node
        .find_all("link")
        .iter()
        .filter(|l| {
            l.attr("type")
                .map_or(false, |t| t.eq_ignore_ascii_case(link_type))
        })
        .filter_map(|l| node_value(l))
        .collect();
    join_or_missing(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
    <boardgame objectid="1">
        <yearpublished> 2017 </yearpublished>
        <minplayers value="2"/>
        <maxplayers value="">5</maxplayers>
        <age value="  "/>
        <boardgamedesigner>Isaac Childres</boardgamedesigner>
        <boardgameartist>Alexandr Elichev</boardgameartist>
        <boardgameartist>   </boardgameartist>
        <boardgameartist value="Josh T. McDowell"/>
        <link type="boardgamecategory" value="Adventure"/>
        <link type="BoardGameCategory">Fantasy &amp; Myth</link>
        <link type="boardgamemechanic" value="Hand Management"/>
        <link type="boardgamecategory" value=""/>
        <description>A <b>bold</b> game</description>
    </boardgame>
    "#;

    fn parse() -> roxmltree::Document<'static> {
        roxmltree::Document::parse(DOC).unwrap()
    }

    #[test]
    fn tag_value_text_or_attribute() {
        let doc = parse();
        let item = doc.root_element();
        assert_eq!(find_tag_value(item, "yearpublished"), "2017");
        assert_eq!(find_tag_value(item, "minplayers"), "2");
        assert_eq!(find_tag_value(item, "maxplayers"), "5");
        assert_eq!(find_tag_value(item, "description"), "A bold game");
    }

    #[test]
    fn tag_value_missing() {
        let doc = parse();
        let item = doc.root_element();
        assert_eq!(find_tag_value(item, "age"), NOT_AVAILABLE);
        assert_eq!(find_tag_value(item, "minplaytime"), NOT_AVAILABLE);
    }

    #[test]
    fn joined_values_skip_empty() {
        let doc = parse();
        let item = doc.root_element();
        assert_eq!(
            join_tag_values(item, "boardgameartist"),
            "Alexandr Elichev; Josh T. McDowell"
        );
        assert_eq!(join_tag_values(item, "boardgamepublisher"), NOT_AVAILABLE);
        assert_eq!(join_tag_values(item, "age"), NOT_AVAILABLE);
    }

    #[test]
    fn single_tag_has_no_separator() {
        let doc = parse();
        let item = doc.root_element();
        assert_eq!(join_tag_values(item, "boardgamedesigner"), "Isaac Childres");
    }

    #[test]
    fn links_match_type_without_case() {
        let doc = parse();
        let item = doc.root_element();
        assert_eq!(
            extract_link_values(item, "boardgamecategory"),
            "Adventure; Fantasy & Myth"
        );
        assert_eq!(
            extract_link_values(item, "BOARDGAMEMECHANIC"),
            "Hand Management"
        );
        assert_eq!(extract_link_values(item, "boardgamefamily"), NOT_AVAILABLE);
    }
}
