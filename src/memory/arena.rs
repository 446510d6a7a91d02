//! Node arena shared by the in-memory writer and reader.

use crate::core::{NodeId, ObjectHeader, PropertyHeader, SampleKey, SampleWrite};
use crate::util::{Dimensions, Error, Result};

pub(super) struct ObjectNode {
    pub header: ObjectHeader,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub properties: NodeId,
}

pub(super) struct PropertyNode {
    pub header: PropertyHeader,
    pub parent: Option<NodeId>,
    pub object: NodeId,
    pub body: PropertyBody,
}

pub(super) enum PropertyBody {
    Compound(Vec<NodeId>),
    Sampled(SampleStore),
}

pub(super) enum Node {
    Object(ObjectNode),
    Property(PropertyNode),
}

/// One stored payload.
pub(super) struct Slot {
    pub bytes: Vec<u8>,
    pub dims: Dimensions,
    pub key: SampleKey,
}

/// Physical slots plus the logical index -> slot map.
#[derive(Default)]
pub(super) struct SampleStore {
    pub slots: Vec<Slot>,
    pub index: Vec<usize>,
    pub first_changed: usize,
    pub last_changed: usize,
}

impl SampleStore {
    pub fn push(&mut self, sample: SampleWrite<'_>, name: &str) -> Result<()> {
        let logical = self.index.len();
        match sample {
            SampleWrite::Data { bytes, dims, key } => {
                self.slots.push(Slot { bytes: bytes.to_vec(), dims: dims.clone(), key });
                if logical > 0 {
                    if self.first_changed == 0 {
                        self.first_changed = logical;
                    }
                    self.last_changed = logical;
                }
                self.index.push(self.slots.len() - 1);
            }
            SampleWrite::Repeat => {
                let &previous = self
                    .index
                    .last()
                    .ok_or_else(|| Error::NoPreviousSample(name.to_string()))?;
                self.index.push(previous);
            }
        }
        Ok(())
    }

    pub fn slot(&self, index: usize) -> Result<&Slot> {
        self.index
            .get(index)
            .and_then(|&s| self.slots.get(s))
            .ok_or(Error::SampleOutOfBounds { index, count: self.index.len() })
    }

    /// Time sampling consumers only need one sample of a constant property.
    pub fn max_samples_hint(&self) -> usize {
        match self.index.len() {
            n if n > 0 && self.last_changed == 0 => 1,
            n => n,
        }
    }
}

#[derive(Default)]
pub(super) struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    /// Arena holding only the root object and its top compound.
    pub fn with_root() -> Self {
        let mut arena = Self::default();
        let root_props = NodeId::new(1);
        arena.nodes.push(Node::Object(ObjectNode {
            header: ObjectHeader::new("ABC", "/"),
            parent: None,
            children: Vec::new(),
            properties: root_props,
        }));
        arena.nodes.push(Node::Property(PropertyNode {
            header: PropertyHeader::compound(""),
            parent: None,
            object: NodeId::ROOT,
            body: PropertyBody::Compound(Vec::new()),
        }));
        arena
    }

    pub fn next_id(&self) -> NodeId {
        NodeId::new(self.nodes.len())
    }

    pub fn push(&mut self, node: Node) -> NodeId {
        let id = self.next_id();
        self.nodes.push(node);
        id
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn object(&self, id: NodeId) -> Result<&ObjectNode> {
        match self.nodes.get(id.index()) {
            Some(Node::Object(o)) => Ok(o),
            _ => Err(Error::ObjectNotFound(format!("node {}", id.index()))),
        }
    }

    pub fn object_mut(&mut self, id: NodeId) -> Result<&mut ObjectNode> {
        match self.nodes.get_mut(id.index()) {
            Some(Node::Object(o)) => Ok(o),
            _ => Err(Error::ObjectNotFound(format!("node {}", id.index()))),
        }
    }

    pub fn property(&self, id: NodeId) -> Result<&PropertyNode> {
        match self.nodes.get(id.index()) {
            Some(Node::Property(p)) => Ok(p),
            _ => Err(Error::PropertyNotFound(format!("node {}", id.index()))),
        }
    }

    pub fn property_mut(&mut self, id: NodeId) -> Result<&mut PropertyNode> {
        match self.nodes.get_mut(id.index()) {
            Some(Node::Property(p)) => Ok(p),
            _ => Err(Error::PropertyNotFound(format!("node {}", id.index()))),
        }
    }

    pub fn compound_children(&self, id: NodeId) -> Result<&[NodeId]> {
        let prop = self.property(id)?;
        match &prop.body {
            PropertyBody::Compound(children) => Ok(children),
            PropertyBody::Sampled(_) => Err(Error::TypeMismatch {
                expected: "compound".into(),
                actual: prop.header.property_type.to_string(),
            }),
        }
    }

    pub fn store(&self, id: NodeId) -> Result<&SampleStore> {
        let prop = self.property(id)?;
        match &prop.body {
            PropertyBody::Sampled(store) => Ok(store),
            PropertyBody::Compound(_) => Err(Error::TypeMismatch {
                expected: "scalar or array".into(),
                actual: "compound".into(),
            }),
        }
    }

    pub fn find_property(&self, compound: NodeId, name: &str) -> Option<NodeId> {
        self.compound_children(compound).ok()?.iter().copied().find(|&c| {
            self.property(c).map_or(false, |p| p.header.name == name)
        })
    }

    pub fn find_child(&self, object: NodeId, name: &str) -> Option<NodeId> {
        self.object(object).ok()?.children.iter().copied().find(|&c| {
            self.object(c).map_or(false, |o| o.header.name == name)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::PlainOldDataType;

    fn data<'a>(bytes: &'a [u8], dims: &'a Dimensions) -> SampleWrite<'a> {
        SampleWrite::Data { bytes, dims, key: SampleKey::from_bytes(bytes, PlainOldDataType::Uint8) }
    }

    #[test]
    fn test_store_shares_slots() {
        let dims = Dimensions::scalar();
        let mut store = SampleStore::default();
        assert!(matches!(store.push(SampleWrite::Repeat, "p"), Err(Error::NoPreviousSample(_))));
        store.push(data(&[5], &dims), "p").unwrap();
        store.push(SampleWrite::Repeat, "p").unwrap();
        store.push(data(&[7], &dims), "p").unwrap();
        store.push(SampleWrite::Repeat, "p").unwrap();
        assert_eq!(store.slots.len(), 2);
        assert_eq!(store.index, vec![0, 0, 1, 1]);
        assert_eq!((store.first_changed, store.last_changed), (2, 2));
        assert_eq!(store.slot(3).unwrap().bytes, vec![7]);
        assert!(store.slot(4).is_err());
        assert_eq!(store.max_samples_hint(), 4);
    }

    #[test]
    fn test_root_layout() {
        let arena = Arena::with_root();
        let root = arena.object(NodeId::ROOT).unwrap();
        assert_eq!(root.header.full_name, "/");
        assert!(arena.compound_children(root.properties).unwrap().is_empty());
        assert!(arena.property(NodeId::ROOT).is_err());
    }
}
