use super::error::{AccessError, checked_get};
use super::model::Model;
use std::path::Path;

/// Every model read from one structure source, in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Structure {
    name: String,
    models: Vec<Model>,
}

impl Structure {
    /// Creates a structure from already assembled models.
    ///
    /// # Arguments
    ///
    /// * `name` - The source name, normally the path the structure was read from.
    /// * `models` - The models in source order.
    pub fn new(name: impl Into<String>, models: Vec<Model>) -> Self {
        Self {
            name: name.into(),
            models,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    /// Returns the `n`-th model.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::EmptyCollection`] when the source produced no models at
    /// all, and [`AccessError::IndexOutOfRange`] when `n` is past the last model.
    pub fn model(&self, n: usize) -> Result<&Model, AccessError> {
        checked_get(&self.models, n, "models", || {
            format!("structure '{}'", self.name)
        })
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Header stem used for sequence export: the file name with its 4-character
    /// extension (e.g. ".pdb") stripped.
    pub fn fasta_stem(&self) -> String {
        let file_name = Path::new(&self.name)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.name.clone());
        let chars: Vec<char> = file_name.chars().collect();
        if chars.len() > 4 {
            chars[..chars.len() - 4].iter().collect()
        } else {
            file_name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_access_on_empty_structure_names_the_collection() {
        let structure = Structure::new("empty.pdb", Vec::new());
        let err = structure.model(0).unwrap_err();
        assert_eq!(
            err,
            AccessError::EmptyCollection {
                collection: "models",
                owner: "structure 'empty.pdb'".into()
            }
        );
    }

    #[test]
    fn model_access_out_of_range_is_reported() {
        let structure = Structure::new("two.pdb", vec![Model::new(1), Model::new(2)]);
        assert_eq!(structure.model(1).unwrap().serial(), 2);
        assert!(matches!(
            structure.model(2),
            Err(AccessError::IndexOutOfRange { index: 2, len: 2, .. })
        ));
    }

    #[test]
    fn fasta_stem_strips_four_character_extension() {
        assert_eq!(Structure::new("1ubq.pdb", vec![]).fasta_stem(), "1ubq");
        assert_eq!(
            Structure::new("data/inputs/dna_dimer.pdb", vec![]).fasta_stem(),
            "dna_dimer"
        );
        assert_eq!(Structure::new("abc", vec![]).fasta_stem(), "abc");
    }
}
