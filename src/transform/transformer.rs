use crate::edit::{apply_edits, Edit};
use crate::modelica::ModelicaParser;
use crate::transform::errors::TransformError;
use crate::transform::transformation::Transformation;
use crate::tree::{SourceParser, SyntaxTree};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Collects transformations and applies them to documents as one batch.
///
/// Transformations persist across calls. The edit list is rebuilt on every
/// `execute` and can be inspected afterwards through [`Transformer::edits`].
#[derive(Debug)]
pub struct Transformer<P = ModelicaParser> {
    parser: P,
    transformations: Vec<Transformation>,
    edits: Vec<Edit>,
}

impl Transformer<ModelicaParser> {
    pub fn new() -> Self {
        Self::with_parser(ModelicaParser::new())
    }
}

impl Default for Transformer<ModelicaParser> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: SourceParser> Transformer<P> {
    /// Transformer over documents in another grammar.
    pub fn with_parser(parser: P) -> Self {
        Self {
            parser,
            transformations: Vec::new(),
            edits: Vec::new(),
        }
    }

    pub fn add(&mut self, transformation: Transformation) -> &mut Self {
        self.transformations.push(transformation);
        self
    }

    pub fn transformations(&self) -> &[Transformation] {
        &self.transformations
    }

    /// Edits resolved by the most recent run, in resolve order.
    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    /// Parse `source`, resolve every transformation, and return the edited
    /// text.
    pub fn execute(&mut self, source: &str) -> Result<String, TransformError> {
        self.edits.clear();
        let tree = self.parser.parse(source)?;
        self.execute_tree(&tree)
    }

    pub fn execute_file(&mut self, path: impl AsRef<Path>) -> Result<String, TransformError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| TransformError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "transforming file");
        self.execute(&source)
    }

    /// Run against an already-parsed tree.
    pub fn execute_tree(&mut self, tree: &SyntaxTree) -> Result<String, TransformError> {
        self.edits.clear();
        let root = tree.root();

        let mut edits = Vec::new();
        for transformation in &self.transformations {
            let resolved = transformation
                .resolve(root)
                .map_err(|source| TransformError::Select {
                    transformation: transformation.label(),
                    source,
                })?;
            debug!(
                transformation = %transformation.label(),
                edits = resolved.len(),
                "resolved transformation"
            );
            edits.extend(resolved);
        }

        debug!(edits = edits.len(), "applying edits");
        self.edits = edits;
        Ok(apply_edits(tree.source(), &self.edits)?)
    }
}
