//! Sane snippets: extraction and compilation of editor snippets
//!
//!     Two pieces of work live here, and neither depends on a particular editor.
//!
//!     Extraction turns the selections of a buffer into a snippet template. The
//!     selections become numbered placeholders, the text between them stays
//!     literal. See ./region.rs for the inversion that finds the literal text and
//!     ./extract.rs for the placeholder numbering and escaping.
//!
//!     Compilation turns a definition file (a `---` header of `key: value` lines
//!     plus a body) into the record a snippet engine loads. Artifacts are keyed
//!     by the definition's uuid; see ./compile.rs for how stale artifacts are
//!     found and removed.
//!
//!     This is a pure lib: it powers snip-cli and editor integrations but makes
//!     no assumption about a shell. Editor state comes in through the
//!     [`Buffer`] trait and user-facing errors go out through [`Reporter`].
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── region.rs           # Region algebra and inversion
//!     ├── buffer.rs           # Buffer trait and in-memory buffer
//!     ├── extract.rs          # Tab-stop extraction
//!     ├── template.rs         # Generated definition templates
//!     ├── definition.rs       # Definition parsing
//!     ├── slug.rs             # Filesystem-safe names
//!     ├── compile.rs          # Artifacts, save hook and regeneration
//!     └── lib.rs
//!
//! Testing
//!     Unit tests sit next to the code. tests/ holds the scenarios that touch the
//!     filesystem across several operations (save hook, regeneration) and the
//!     extraction snapshots.

pub mod buffer;
pub mod compile;
pub mod definition;
pub mod error;
pub mod extract;
pub mod region;
pub mod slug;
pub mod template;

pub use buffer::{Buffer, TextBuffer};
pub use compile::{
    CollectingReporter, CompileOptions, CompileOutcome, Compiler, LogReporter,
    RegenerateSummary, Reporter,
};
pub use definition::{parse, SnippetDefinition};
pub use error::SnippetError;
pub use extract::{extract, ExtractOptions};
pub use region::{invert, Region, RegionKind};
pub use template::{new_snippet_template, templates_for_selections, TemplateDefaults};
