//! Read-only access to the diagram's elements. The router consumes a
//! [`SceneView`]: the scene's elements with an optional overlay of changed
//! elements stacked on top, as supplied mid-drag by the host.

use std::collections::HashMap;

use crate::element::{Element, ElementId};

/// Z-ordered store of diagram elements; later elements render on top.
#[derive(Debug, Default, Clone)]
pub struct Scene {
    elements: Vec<Element>,
    index: HashMap<ElementId, usize>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an element on top, or replaces it in place when the id is
    /// already present.
    pub fn insert(&mut self, element: Element) {
        match self.index.get(&element.id) {
            Some(&slot) => self.elements[slot] = element,
            None => {
                self.index.insert(element.id.clone(), self.elements.len());
                self.elements.push(element);
            }
        }
    }

    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.index.get(id).map(|&slot| &self.elements[slot])
    }

    /// All live elements, bottom to top
    pub fn non_deleted_elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|element| !element.is_deleted)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Snapshot without an overlay
    pub fn view(&self) -> SceneView<'_> {
        SceneView {
            scene: self,
            changed: None,
        }
    }

    /// Snapshot with `changed` elements taking precedence during lookups
    pub fn view_with_changes<'a>(
        &'a self,
        changed: &'a HashMap<ElementId, Element>,
    ) -> SceneView<'a> {
        SceneView {
            scene: self,
            changed: Some(changed),
        }
    }
}

/// Immutable snapshot the router reads; never mutated by routing.
#[derive(Debug, Clone, Copy)]
pub struct SceneView<'a> {
    scene: &'a Scene,
    changed: Option<&'a HashMap<ElementId, Element>>,
}

impl<'a> SceneView<'a> {
    /// Element lookup, overlay first
    pub fn element(self, id: &ElementId) -> Option<&'a Element> {
        if let Some(changed) = self.changed {
            if let Some(element) = changed.get(id) {
                return Some(element);
            }
        }
        self.scene.element(id)
    }

    /// Live elements bottom to top, each substituted by its overlay entry
    /// when present.
    pub fn non_deleted_elements(self) -> impl Iterator<Item = &'a Element> + 'a {
        self.scene
            .elements
            .iter()
            .map(move |element| {
                self.changed
                    .and_then(|changed| changed.get(&element.id))
                    .unwrap_or(element)
            })
            .filter(|element| !element.is_deleted)
    }
}
