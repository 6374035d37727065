use std::collections::BTreeMap;

/// Identifier plus named string references carried by trackable objects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Meta {
    pub id: u32,
    pub references: BTreeMap<String, String>,
}

/// Identifier and named-metadata capability used by the persistence layer.
pub trait Metadata {
    fn meta(&self) -> &Meta;
    fn meta_mut(&mut self) -> &mut Meta;

    fn id(&self) -> u32 {
        self.meta().id
    }

    fn set_id(&mut self, id: u32) {
        self.meta_mut().id = id;
    }

    fn reference(&self, name: &str) -> Option<&str> {
        self.meta().references.get(name).map(String::as_str)
    }

    fn set_reference(&mut self, name: &str, value: &str) {
        self.meta_mut()
            .references
            .insert(name.to_owned(), value.to_owned());
    }

    fn references(&self) -> &BTreeMap<String, String> {
        &self.meta().references
    }
}

impl Metadata for Meta {
    fn meta(&self) -> &Meta {
        self
    }

    fn meta_mut(&mut self) -> &mut Meta {
        self
    }
}
