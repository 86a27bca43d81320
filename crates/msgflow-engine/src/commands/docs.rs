//! Documentation site generation.
//!
//! ## Pipeline (in order):
//! 1. Sort the schema
//! 2. Advance metadata against `messageflow.json` and persist it
//! 3. Recreate `diagrams/` and draw every view in parallel
//! 4. Write `README.md`
//!
//! Each diagram is an independent unit running on the blocking pool. Units
//! check the cancellation token before starting; the first failure cancels
//! the token and aborts whatever has not finished. Diagrams already written
//! are left in place.

#![allow(clippy::result_large_err)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use msgflow_core::errors::{ExError, ExErrorKind};
use msgflow_core::{
    log_op_end, log_op_error, log_op_start, FormatMode, FormatOptions, Metadata, Schema, Target,
};
use msgflow_store::atomic::atomic_write;
use msgflow_store::errors::{io_error, Result};
use msgflow_store::MetadataStore;

use crate::readme::{self, DiagramNames, DIAGRAMS_DIR};

/// Output settings of a `gen-docs` run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsOptions {
    pub output: PathBuf,
    /// README heading
    pub title: String,
}

impl Default for DocsOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from("."),
            title: "Message Flow".to_string(),
        }
    }
}

impl DocsOptions {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// What a `gen-docs` run wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsReport {
    /// Diagram files, sorted
    pub diagrams: Vec<PathBuf>,
    pub readme: PathBuf,
    pub metadata: PathBuf,
    /// Number of changes appended to the history by this run
    pub changes_len: usize,
}

/// One diagram to draw
#[derive(Debug, Clone, PartialEq, Eq)]
struct DiagramUnit {
    view: DiagramView,
    file_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DiagramView {
    Context,
    Service(String),
    Channel(String),
}

impl DiagramUnit {
    fn options(&self) -> FormatOptions {
        match &self.view {
            DiagramView::Context => FormatOptions::new(FormatMode::ContextServices),
            DiagramView::Service(name) => {
                FormatOptions::new(FormatMode::ServiceServices).with_service(name.clone())
            }
            DiagramView::Channel(name) => FormatOptions::new(FormatMode::ChannelServices)
                .with_channel(name.clone())
                .omitting_payloads(),
        }
    }
}

/// Context first, then services and channels by name
///
/// File names come from [`DiagramNames`], the same table the README links
/// through, so no two units write the same file.
fn diagram_units(schema: &Schema) -> Vec<DiagramUnit> {
    let names = DiagramNames::new(schema);
    let mut units = vec![DiagramUnit {
        view: DiagramView::Context,
        file_name: readme::context_diagram(),
    }];
    units.extend(names.services().map(|(name, file)| DiagramUnit {
        view: DiagramView::Service(name.to_string()),
        file_name: file.to_string(),
    }));
    units.extend(names.channels().map(|(name, file)| DiagramUnit {
        view: DiagramView::Channel(name.to_string()),
        file_name: file.to_string(),
    }));
    units
}

/// Generate the documentation site for `schema` into `options.output`
///
/// # Errors
///
/// - `Io`/`Serialization` when metadata, diagrams or the README cannot be
///   read or written
/// - the first formatting or rendering error of any diagram
/// - `Cancelled` when `cancel` was triggered before a diagram started
/// - `Internal` when a diagram task panicked
pub async fn generate_docs(
    schema: Schema,
    target: Arc<dyn Target>,
    options: &DocsOptions,
    cancel: CancellationToken,
) -> Result<DocsReport> {
    let start = Instant::now();
    log_op_start!(
        "generate_docs",
        services_len = schema.services.len(),
        output = %options.output.display()
    );

    let result = run(schema, target, options, cancel).await;

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(report) => log_op_end!(
            "generate_docs",
            duration_ms = duration_ms,
            views_len = report.diagrams.len(),
            changes_len = report.changes_len
        ),
        Err(err) => log_op_error!("generate_docs", err.clone(), duration_ms = duration_ms),
    }

    result
}

async fn run(
    schema: Schema,
    target: Arc<dyn Target>,
    options: &DocsOptions,
    cancel: CancellationToken,
) -> Result<DocsReport> {
    let schema = schema.sorted();

    let store = MetadataStore::new(&options.output);
    let previous = store.load()?;
    let record = Metadata::advance(previous, schema.clone(), Utc::now());
    store.save(&record.metadata)?;
    let changes_len = record.appended.as_ref().map_or(0, |c| c.changes.len());

    let diagrams_dir = options.output.join(DIAGRAMS_DIR);
    recreate_dir(&diagrams_dir)?;

    let schema = Arc::new(schema);
    let diagrams = draw_all(&schema, &target, &diagrams_dir, &cancel).await?;

    let readme_path = options.output.join("README.md");
    let content = readme::render_readme(&schema, &options.title, &record.metadata.changelogs)?;
    atomic_write(&readme_path, content.as_bytes())?;

    Ok(DocsReport {
        diagrams,
        readme: readme_path,
        metadata: store.path().to_path_buf(),
        changes_len,
    })
}

fn recreate_dir(dir: &Path) -> Result<()> {
    let entity = dir.display().to_string();
    if dir.exists() {
        fs::remove_dir_all(dir)
            .map_err(|e| io_error("remove_diagrams_dir", e).with_entity(entity.clone()))?;
    }
    fs::create_dir_all(dir).map_err(|e| io_error("create_diagrams_dir", e).with_entity(entity))
}

/// Fan out one blocking task per diagram and wait for all of them
async fn draw_all(
    schema: &Arc<Schema>,
    target: &Arc<dyn Target>,
    dir: &Path,
    cancel: &CancellationToken,
) -> Result<Vec<PathBuf>> {
    let mut tasks = JoinSet::new();
    for unit in diagram_units(schema) {
        let schema = Arc::clone(schema);
        let target = Arc::clone(target);
        let dir = dir.to_path_buf();
        let cancel = cancel.clone();
        tasks.spawn_blocking(move || draw(&schema, target.as_ref(), &unit, &dir, &cancel));
    }

    let mut written = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        let failure = match joined {
            Ok(Ok(path)) => {
                written.push(path);
                continue;
            }
            Ok(Err(err)) => err,
            Err(join_err) => ExError::new(ExErrorKind::Internal)
                .with_op("draw_diagram")
                .with_message(join_err.to_string()),
        };

        cancel.cancel();
        tasks.abort_all();
        tracing::warn!(
            written = written.len(),
            err_code = failure.code(),
            "diagram generation stopped"
        );
        return Err(failure);
    }

    written.sort();
    Ok(written)
}

fn draw(
    schema: &Schema,
    target: &dyn Target,
    unit: &DiagramUnit,
    dir: &Path,
    cancel: &CancellationToken,
) -> Result<PathBuf> {
    let file_name = unit.file_name.clone();
    if cancel.is_cancelled() {
        return Err(ExError::new(ExErrorKind::Cancelled)
            .with_op("draw_diagram")
            .with_entity(file_name)
            .with_message("cancelled before start"));
    }

    let start = Instant::now();
    log_op_start!("draw_diagram", file = %file_name);

    let result = format_and_render(schema, target, unit, &dir.join(&file_name));

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(_) => log_op_end!("draw_diagram", duration_ms = duration_ms, file = %file_name),
        Err(err) => log_op_error!(
            "draw_diagram",
            err.clone(),
            duration_ms = duration_ms,
            file = %file_name
        ),
    }

    result.map_err(|e| e.with_entity(file_name))
}

fn format_and_render(
    schema: &Schema,
    target: &dyn Target,
    unit: &DiagramUnit,
    path: &Path,
) -> Result<PathBuf> {
    let formatted = target.format_schema(schema, &unit.options())?;
    let image = target.render_schema(&formatted)?;
    atomic_write(path, &image)?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use msgflow_core::{Channel, Message, Operation, Service};

    #[test]
    fn test_units_cover_context_services_and_every_channel() {
        let schema = Schema::new(vec![Service::new("Asker", "").with_operation(
            Operation::send(Channel::new("ask", vec![Message::new("Q", "{}")]))
                .with_reply(Channel::new("answer", vec![Message::new("A", "{}")])),
        )]);

        let files: Vec<String> = diagram_units(&schema)
            .into_iter()
            .map(|unit| unit.file_name)
            .collect();
        assert_eq!(
            files,
            vec![
                "context.svg",
                "service_asker.svg",
                "channel_answer.svg",
                "channel_ask.svg"
            ]
        );
    }

    #[test]
    fn test_units_never_share_a_file() {
        let schema = Schema::new(vec![Service::new("Users", "")
            .with_operation(Operation::send(Channel::new("user.created", vec![])))
            .with_operation(Operation::send(Channel::new("user_created", vec![])))
            .with_operation(Operation::send(Channel::new("usercreated", vec![])))]);

        let units = diagram_units(&schema);
        let files: std::collections::BTreeSet<&str> =
            units.iter().map(|u| u.file_name.as_str()).collect();

        assert_eq!(units.len(), 5);
        assert_eq!(files.len(), units.len());
    }

    #[test]
    fn test_channel_units_omit_payloads() {
        let options = DiagramUnit {
            view: DiagramView::Channel("ask".to_string()),
            file_name: "channel_ask.svg".to_string(),
        }
        .options();
        assert_eq!(options.mode, FormatMode::ChannelServices);
        assert_eq!(options.channel.as_deref(), Some("ask"));
        assert!(options.omit_payloads);
    }

    #[test]
    fn test_default_options() {
        let options = DocsOptions::default();
        assert_eq!(options.output, PathBuf::from("."));
        assert_eq!(options.title, "Message Flow");
    }
}
