// Primitives for reading XML item documents.

use roxmltree::{Document, Node};

use crate::dump::*;

/// Names of the elements holding one item: `boardgame` in the first version of the
/// API, `item` in the second one.
const ITEM_TAGS: [&str; 2] = ["boardgame", "item"];

impl<'a, 'input: 'a> RecordNode for Node<'a, 'input> {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attribute(name)
    }

    fn inner_text(&self) -> String {
        self.descendants()
            .filter(|n| n.is_text())
            .filter_map(|n| n.text())
            .collect()
    }

    fn find_all(&self, tag: &str) -> Vec<Self> {
        self.descendants()
            .skip(1)
            .filter(|n| n.is_element() && n.tag_name().name() == tag)
            .collect()
    }
}

pub fn read_document(path: &str) -> DumpResult<String> {
    info!("Attempting to read item file {:?}", path);
    fs::read_to_string(path).context(OpeningFileSnafu { path })
}

pub fn parse_document<'input>(contents: &'input str, path: &str) -> DumpResult<Document<'input>> {
    Document::parse(contents).context(ParsingXmlSnafu { path })
}

/// All the item elements of the document, in document order.
pub fn item_nodes<'a, 'input>(doc: &'a Document<'input>) -> Vec<Node<'a, 'input>> {
    doc.root_element()
        .descendants()
        .filter(|n| n.is_element() && ITEM_TAGS.contains(&n.tag_name().name()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_of_both_api_versions() {
        let v1 = r#"<boardgames><boardgame objectid="1"/><boardgame objectid="2"/></boardgames>"#;
        let doc = parse_document(v1, "v1.xml").unwrap();
        let ids: Vec<Option<&str>> = item_nodes(&doc)
            .iter()
            .map(|n| n.attribute("objectid"))
            .collect();
        assert_eq!(ids, vec![Some("1"), Some("2")]);

        let v2 = r#"<items total="1"><item type="boardgame" id="13"><name type="primary" value="CATAN"/></item></items>"#;
        let doc = parse_document(v2, "v2.xml").unwrap();
        assert_eq!(item_nodes(&doc).len(), 1);
    }

    #[test]
    fn single_item_document() {
        let doc = parse_document(r#"<item id="7"><yearpublished value="1995"/></item>"#, "one.xml").unwrap();
        let items = item_nodes(&doc);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].find_all("yearpublished").len(), 1);
    }

    #[test]
    fn malformed_document() {
        let res = parse_document("<boardgames><boardgame></boardgames>", "bad.xml");
        assert!(matches!(res, Err(DumpError::ParsingXml { .. })));
    }
}
