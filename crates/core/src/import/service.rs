//! Import reconciliation engine - core business logic
//!
//! Consumes a batch of raw work-item records, resolves name/title
//! references purely from the batch, diffs against persisted state, and
//! classifies each record as insert, update, or unchanged. All
//! classification happens over the whole batch in memory; storage is
//! touched in a single transactional write phase at the end.
//!
//! Two concurrent imports of overlapping IDs race between the diff and the
//! write (last write wins at the storage layer). This is accepted for the
//! single-operator import use case; see DESIGN.md.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use flowtrack_domain::normalize::{normalize_title, parse_strict_date};
use flowtrack_domain::{
    FlowtrackError, ImportSummary, ParsedWorkItem, RawWorkItem, Result, ValidationIssue,
    WorkItemRow,
};
use tracing::{debug, info, instrument};

use super::ports::{DimensionKind, DimensionRepository, WorkItemRepository};

/// Work-item import service.
pub struct ImportService {
    work_items: Arc<dyn WorkItemRepository>,
    dimensions: Arc<dyn DimensionRepository>,
}

impl ImportService {
    /// Create a new import service over the persistence ports.
    pub fn new(
        work_items: Arc<dyn WorkItemRepository>,
        dimensions: Arc<dyn DimensionRepository>,
    ) -> Self {
        Self { work_items, dimensions }
    }

    /// Reconcile a batch of raw records against persisted state.
    ///
    /// Any record failing validation rejects the whole batch (no partial
    /// write) with a per-field issue list. Parent titles resolve only
    /// against items in this same batch; a parent not present in the
    /// batch resolves to no-parent. Re-importing an unchanged batch is
    /// idempotent and reports every record as ignored.
    #[instrument(skip(self, raw_items), fields(batch_len = raw_items.len()))]
    pub async fn import_batch(&self, raw_items: &[RawWorkItem]) -> Result<ImportSummary> {
        if raw_items.is_empty() {
            return Err(FlowtrackError::validation_single(ValidationIssue::for_batch(
                "batch must contain at least one record",
                "too_small",
            )));
        }

        let parsed = parse_batch(raw_items)?;

        let person_map = self.resolve_dimension(DimensionKind::Person, assignee_names(&parsed)).await?;
        let type_map =
            self.resolve_dimension(DimensionKind::WorkItemType, type_names(&parsed)).await?;

        // Parent titles resolve strictly against this batch's own titles.
        let title_to_id: HashMap<&str, i64> =
            parsed.iter().map(|item| (item.title_normalized.as_str(), item.id)).collect();

        let mut resolved = Vec::with_capacity(parsed.len());
        for item in &parsed {
            resolved.push(resolve_references(item, &person_map, &type_map, &title_to_id)?);
        }

        let ids: Vec<i64> = resolved.iter().map(|row| row.id).collect();
        let existing_by_id: HashMap<i64, WorkItemRow> =
            self.work_items.find_by_ids(&ids).await?.into_iter().map(|row| (row.id, row)).collect();

        let mut to_insert = Vec::new();
        let mut to_update = Vec::new();
        let mut ignored = 0usize;

        for row in resolved {
            match existing_by_id.get(&row.id) {
                None => to_insert.push(row),
                Some(current) if current.differs_from(&row) => to_update.push(row),
                Some(_) => ignored += 1,
            }
        }

        debug!(
            inserts = to_insert.len(),
            updates = to_update.len(),
            ignored,
            "batch classified, entering write phase"
        );

        let (inserted, updated) = self.work_items.apply(&to_insert, &to_update).await?;

        info!(inserted, updated, ignored, "import batch reconciled");
        Ok(ImportSummary { inserted, updated, ignored })
    }

    /// Two-phase dimension resolution: insert-if-absent for every new
    /// name, then a full reread of the table into a canonical-name → id
    /// map.
    async fn resolve_dimension(
        &self,
        kind: DimensionKind,
        entries: Vec<(String, String)>,
    ) -> Result<HashMap<String, String>> {
        if entries.is_empty() {
            return Ok(HashMap::new());
        }
        self.dimensions.upsert_names(kind, &entries).await?;
        self.dimensions.load_canonical_map(kind).await
    }
}

/// Parse every raw record, collecting issues across the whole batch so
/// the caller sees all problems at once.
fn parse_batch(raw_items: &[RawWorkItem]) -> Result<Vec<ParsedWorkItem>> {
    let mut parsed = Vec::with_capacity(raw_items.len());
    let mut issues = Vec::new();

    for (index, raw) in raw_items.iter().enumerate() {
        match parse_record(index, raw) {
            Ok(item) => parsed.push(item),
            Err(mut record_issues) => issues.append(&mut record_issues),
        }
    }

    if issues.is_empty() {
        Ok(parsed)
    } else {
        Err(FlowtrackError::Validation(issues))
    }
}

fn parse_record(
    index: usize,
    raw: &RawWorkItem,
) -> std::result::Result<ParsedWorkItem, Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    let id = match required(index, "id", raw.id.as_deref(), &mut issues) {
        Some(text) => match text.parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) => {
                issues.push(ValidationIssue::for_record_field(
                    index,
                    "id",
                    format!("expected an integer ID, got {text:?}"),
                    "invalid_id",
                ));
                None
            }
        },
        None => None,
    };

    let work_item_type = required(index, "work item type", raw.work_item_type.as_deref(), &mut issues);
    let state = required(index, "state", raw.state.as_deref(), &mut issues);
    let title = required(index, "title", raw.title.as_deref(), &mut issues);

    let title_normalized = title.as_deref().and_then(normalize_title);
    if title.is_some() && title_normalized.is_none() {
        issues.push(ValidationIssue::for_record_field(
            index,
            "title",
            "title collapses to nothing after canonicalization",
            "invalid_title",
        ));
    }
    if let Some(type_name) = work_item_type.as_deref() {
        if normalize_title(type_name).is_none() {
            issues.push(ValidationIssue::for_record_field(
                index,
                "work item type",
                "type name collapses to nothing after canonicalization",
                "invalid_name",
            ));
        }
    }

    let created_date = required(index, "created date", raw.created_date.as_deref(), &mut issues)
        .and_then(|text| parse_date_field(index, "created date", &text, &mut issues));
    let activated_date = optional_date(index, "activated date", raw.activated_date.as_deref(), &mut issues);
    let closed_date = optional_date(index, "closed date", raw.closed_date.as_deref(), &mut issues);

    if !issues.is_empty() {
        return Err(issues);
    }

    // issues is empty here, so every required value is present.
    let (Some(id), Some(work_item_type), Some(state), Some(title), Some(title_normalized), Some(created_date)) =
        (id, work_item_type, state, title, title_normalized, created_date)
    else {
        return Err(vec![ValidationIssue::for_record_field(
            index,
            "id",
            "record could not be parsed",
            "invalid_record",
        )]);
    };

    let assigned_to_name =
        raw.assigned_to.as_deref().map(str::trim).filter(|name| !name.is_empty()).map(str::to_string);
    let parent_title_normalized = raw.parent.as_deref().and_then(normalize_title);

    Ok(ParsedWorkItem {
        id,
        work_item_type,
        state,
        created_date,
        activated_date,
        closed_date,
        title,
        title_normalized,
        description: raw.description.clone(),
        assigned_to_name,
        parent_title_normalized,
    })
}

/// Require a non-empty (after trim) string field.
fn required(
    index: usize,
    field: &str,
    value: Option<&str>,
    issues: &mut Vec<ValidationIssue>,
) -> Option<String> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Some(text.to_string()),
        _ => {
            issues.push(ValidationIssue::for_record_field(index, field, "field is required", "required"));
            None
        }
    }
}

fn parse_date_field(
    index: usize,
    field: &str,
    text: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<chrono::DateTime<chrono::Utc>> {
    match parse_strict_date(text) {
        Ok(instant) => Some(instant),
        Err(err) => {
            issues.push(ValidationIssue::for_record_field(index, field, err.to_string(), "invalid_date"));
            None
        }
    }
}

/// Optional date: absent or blank means absent; anything else must parse.
fn optional_date(
    index: usize,
    field: &str,
    value: Option<&str>,
    issues: &mut Vec<ValidationIssue>,
) -> Option<chrono::DateTime<chrono::Utc>> {
    let text = value.map(str::trim).filter(|text| !text.is_empty())?;
    parse_date_field(index, field, text, issues)
}

/// Distinct non-empty assignee names, paired with their canonical form,
/// in first-seen order.
fn assignee_names(parsed: &[ParsedWorkItem]) -> Vec<(String, String)> {
    distinct_name_pairs(parsed.iter().filter_map(|item| item.assigned_to_name.as_deref()))
}

/// Distinct type names, paired with their canonical form.
fn type_names(parsed: &[ParsedWorkItem]) -> Vec<(String, String)> {
    distinct_name_pairs(parsed.iter().map(|item| item.work_item_type.as_str()))
}

fn distinct_name_pairs<'a>(names: impl Iterator<Item = &'a str>) -> Vec<(String, String)> {
    let mut seen = HashSet::new();
    let mut pairs = Vec::new();
    for name in names {
        let name = name.trim();
        if name.is_empty() || !seen.insert(name.to_string()) {
            continue;
        }
        if let Some(canonical) = normalize_title(name) {
            pairs.push((name.to_string(), canonical));
        }
    }
    pairs
}

/// Resolve assignee, type, and parent references for one parsed record.
///
/// Assignee and parent gaps degrade to `None`; an unresolved type is an
/// internal error because the column is required and the type was
/// upserted moments ago.
fn resolve_references(
    item: &ParsedWorkItem,
    person_map: &HashMap<String, String>,
    type_map: &HashMap<String, String>,
    title_to_id: &HashMap<&str, i64>,
) -> Result<WorkItemRow> {
    let work_item_type_id = normalize_title(&item.work_item_type)
        .and_then(|canonical| type_map.get(&canonical).cloned())
        .ok_or_else(|| {
            FlowtrackError::Internal(format!(
                "work item type {:?} did not resolve after dimension upsert",
                item.work_item_type
            ))
        })?;

    let assigned_to_id = item
        .assigned_to_name
        .as_deref()
        .and_then(normalize_title)
        .and_then(|canonical| person_map.get(&canonical).cloned());

    let parent_id = item
        .parent_title_normalized
        .as_deref()
        .and_then(|title| title_to_id.get(title).copied());

    Ok(WorkItemRow {
        id: item.id,
        work_item_type_id,
        state: item.state.clone(),
        created_date: item.created_date,
        activated_date: item.activated_date,
        closed_date: item.closed_date,
        title: item.title.clone(),
        description: item.description.clone(),
        assigned_to_id,
        parent_id,
    })
}
