//! Rendering spans back into embeddable COinS markup.
//!
//! Pipeline: CoinSpan → KEV title → RcDom element → HTML string

use html5ever::serialize::{SerializeOpts, TraversalScope};
use html5ever::{Attribute, LocalName, QualName, ns, serialize};
use markup5ever_rcdom::{Handle, Node, NodeData, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::parser::{COINS_CLASS, CoinsParser};
use crate::span::CoinSpan;

impl CoinsParser {
    /// Render one `<span class="Z3988">` element per span, newline separated.
    ///
    /// Attribute values are escaped by the html5ever serializer, so the
    /// output parses back to the same spans.
    pub fn html(spans: &[CoinSpan]) -> Result<String> {
        let mut rendered = Vec::with_capacity(spans.len());
        for span in spans {
            let kev = span.to_kev();
            let element = create_element("span", vec![("class", COINS_CLASS), ("title", &kev)]);
            rendered.push(serialize_node(&element)?);
        }
        Ok(rendered.join("\n"))
    }
}

fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

fn serialize_node(node: &Handle) -> Result<String> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    let serializable = SerializableHandle::from(node.clone());
    serialize(&mut output, &serializable, opts)
        .map_err(|e| Error::Serialization(e.to_string()))?;

    String::from_utf8(output).map_err(|e| Error::Serialization(e.to_string()))
}
