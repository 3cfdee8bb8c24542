//! A minimal object type for exercising the store in unit tests.

use crate::reference::Reference;
use crate::traits::{Narrow, StoreObject};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Node {
    Leaf(Leaf),
    Branch(Branch),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Leaf {
    pub name: String,
}

impl Leaf {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Branch {
    pub children: Vec<Reference>,
}

impl StoreObject for Node {
    fn isa(&self) -> &str {
        match self {
            Node::Leaf(_) => "Leaf",
            Node::Branch(_) => "Branch",
        }
    }

    fn identifier_seed(&self) -> String {
        match self {
            Node::Leaf(leaf) => leaf.name.clone(),
            Node::Branch(_) => String::new(),
        }
    }
}

impl Narrow<Node> for Leaf {
    const ISA: &'static str = "Leaf";

    fn narrow(object: &Node) -> Option<&Self> {
        match object {
            Node::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    fn narrow_mut(object: &mut Node) -> Option<&mut Self> {
        match object {
            Node::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }
}

impl Narrow<Node> for Branch {
    const ISA: &'static str = "Branch";

    fn narrow(object: &Node) -> Option<&Self> {
        match object {
            Node::Branch(branch) => Some(branch),
            _ => None,
        }
    }

    fn narrow_mut(object: &mut Node) -> Option<&mut Self> {
        match object {
            Node::Branch(branch) => Some(branch),
            _ => None,
        }
    }
}
