use crate::models::field::ProfileField;


/// How a store's state was changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationKind {
    /// A single field was written.
    Direct { field: &'static str },
    /// Several fields were written in one step.
    Patch { fields: Vec<&'static str> },
    /// The whole state was swapped out.
    Replace,
    Reset,
}

impl MutationKind {
    pub fn patch(fields: &[ProfileField]) -> Self {
        MutationKind::Patch {
            fields: fields.iter().map(|field| field.name()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    pub store_id: &'static str,
    pub kind: MutationKind,
}
