//! Raw payload schema resolution.
//!
//! Analysis backends have shipped several payload shapes over time. Each
//! page is resolved by trying an ordered list of rules; the first field
//! holding a non-empty list wins and shapes are never merged. A new shape is
//! supported by adding one rule.

use super::options::IndexOptions;
use crate::model::{ContentId, Page, PageMetric, Quad, Region, RegionType, TableCell, TableCells};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashSet};

/// Where a page's regions were found in the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadShape {
    /// `rects`: geometry already normalized by the backend
    Rects,
    /// `structured`: paragraph-level structural elements
    Structured,
    /// `content`: legacy line-level content
    Content,
    /// document-level `detail` list filtered by `page_id`
    Detail,
}

impl PayloadShape {
    /// Payload field this shape is read from.
    pub fn field(&self) -> &'static str {
        match self {
            PayloadShape::Rects => "rects",
            PayloadShape::Structured => "structured",
            PayloadShape::Content => "content",
            PayloadShape::Detail => "detail",
        }
    }
}

/// Per-page rules, in priority order. `Detail` is a document-level fallback.
const PAGE_RULES: [PayloadShape; 3] = [
    PayloadShape::Rects,
    PayloadShape::Structured,
    PayloadShape::Content,
];

const POSITION_FIELDS: [&str; 2] = ["pos", "position"];
const ID_FIELDS: [&str; 3] = ["id", "content_id", "paragraph_id"];

/// Result of normalizing one payload.
#[derive(Debug, Default)]
pub(crate) struct NormalizedPayload {
    pub pages: Vec<Page>,
    pub shapes: Vec<Option<PayloadShape>>,
    pub metrics: Vec<PageMetric>,
    pub markdown: Option<String>,
}

/// A page entry before normalization.
struct RawPage<'a> {
    value: Option<&'a Value>,
    page_id: u32,
}

/// Normalize a raw payload. Never fails; bad entries are dropped.
pub(crate) fn normalize(raw: &Value, options: &IndexOptions) -> NormalizedPayload {
    let root = if options.unwrap_envelope {
        unwrap_envelope(raw)
    } else {
        raw
    };

    let Some(root) = root.as_object() else {
        log::warn!("Analysis payload is not a JSON object, building an empty index");
        return NormalizedPayload::default();
    };

    let metrics = parse_metrics(root.get("metrics"));
    let detail = root
        .get(PayloadShape::Detail.field())
        .and_then(Value::as_array)
        .map(Vec::as_slice);

    let raw_pages: Vec<RawPage<'_>> = match root.get("pages").and_then(Value::as_array) {
        Some(pages) => pages
            .iter()
            .enumerate()
            .map(|(i, value)| RawPage {
                value: Some(value),
                page_id: value
                    .get("page_id")
                    .and_then(as_u32)
                    .unwrap_or(i as u32 + 1),
            })
            .collect(),
        None => detail_page_ids(detail)
            .into_iter()
            .map(|page_id| RawPage {
                value: None,
                page_id,
            })
            .collect(),
    };

    log::debug!("Normalizing {} analysis pages", raw_pages.len());

    let normalize_one = |raw: &RawPage<'_>| normalize_page(raw, &metrics, detail);
    let results: Vec<(Page, Option<PayloadShape>)> = if options.parallel {
        raw_pages.par_iter().map(normalize_one).collect()
    } else {
        raw_pages.iter().map(normalize_one).collect()
    };

    let (pages, shapes) = results.into_iter().unzip();
    NormalizedPayload {
        pages,
        shapes,
        metrics,
        markdown: root
            .get("markdown")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}

fn unwrap_envelope(raw: &Value) -> &Value {
    let has_own_data = raw.get("pages").is_some() || raw.get("detail").is_some();
    match raw.get("result") {
        Some(inner) if !has_own_data && inner.is_object() => inner,
        _ => raw,
    }
}

fn detail_page_ids(detail: Option<&[Value]>) -> BTreeSet<u32> {
    detail
        .unwrap_or_default()
        .iter()
        .filter_map(|item| item.get("page_id").and_then(as_u32))
        .collect()
}

fn parse_metrics(value: Option<&Value>) -> Vec<PageMetric> {
    let Some(entries) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            let obj = entry.as_object()?;
            Some(PageMetric {
                page_id: obj.get("page_id").and_then(as_u32)?,
                angle: obj.get("angle").and_then(finite_number),
                dpi: positive_number(obj.get("dpi")),
                ppi: positive_number(obj.get("ppi")),
            })
        })
        .collect()
}

fn normalize_page(
    raw: &RawPage<'_>,
    metrics: &[PageMetric],
    detail: Option<&[Value]>,
) -> (Page, Option<PayloadShape>) {
    let mut page = Page::new(raw.page_id);
    let obj = raw.value.and_then(Value::as_object);
    let metric_angle = metrics
        .iter()
        .find(|m| m.page_id == raw.page_id)
        .and_then(|m| m.angle);

    if let Some(obj) = obj {
        page.width = positive_number(obj.get("width"));
        page.height = positive_number(obj.get("height"));
        page.resolution =
            positive_number(obj.get("ppi")).or_else(|| positive_number(obj.get("dpi")));
        page.angle = obj
            .get("angle")
            .and_then(finite_number)
            .or(metric_angle)
            .unwrap_or(0.0);
    } else {
        page.angle = metric_angle.unwrap_or(0.0);
    }

    match select_items(obj, detail, raw.page_id) {
        Some((shape, items)) => {
            log::debug!(
                "Page {}: reading {} items from `{}`",
                raw.page_id,
                items.len(),
                shape.field()
            );
            page.regions = normalize_regions(raw.page_id, &items);
            (page, Some(shape))
        }
        None => {
            log::warn!(
                "Page {}: no rects/structured/content data, page has no regions",
                raw.page_id
            );
            (page, None)
        }
    }
}

fn select_items<'a>(
    obj: Option<&'a Map<String, Value>>,
    detail: Option<&'a [Value]>,
    page_id: u32,
) -> Option<(PayloadShape, Vec<&'a Value>)> {
    let from_page: Option<(PayloadShape, Vec<&Value>)> = obj.and_then(|obj| {
        PAGE_RULES.iter().find_map(|shape| {
            obj.get(shape.field())
                .and_then(Value::as_array)
                .filter(|items| !items.is_empty())
                .map(|items| (*shape, items.iter().collect()))
        })
    });

    from_page.or_else(|| {
        let items: Vec<&Value> = detail?
            .iter()
            .filter(|item| item.get("page_id").and_then(as_u32) == Some(page_id))
            .collect();
        (!items.is_empty()).then_some((PayloadShape::Detail, items))
    })
}

fn normalize_regions(page_id: u32, items: &[&Value]) -> Vec<Region> {
    let parsed: Vec<(usize, Region, bool)> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let normalized = normalize_region(page_id, index, item);
            if normalized.is_none() {
                log::debug!(
                    "Page {}: dropping item {} without a valid 8-number position",
                    page_id,
                    index
                );
            }
            normalized.map(|(region, explicit)| (index, region, explicit))
        })
        .collect();

    let explicit: HashSet<String> = parsed
        .iter()
        .filter(|(_, _, explicit)| *explicit)
        .map(|(_, region, _)| region.content_id.canonical())
        .collect();

    let mut seen = HashSet::new();
    let mut regions = Vec::with_capacity(parsed.len());

    for (index, mut region, is_explicit) in parsed {
        if !is_explicit {
            let taken = |id: &ContentId| {
                let key = id.canonical();
                explicit.contains(&key) || seen.contains(&key)
            };
            let mut next = index;
            while taken(&region.content_id) {
                next += 1;
                region.content_id = ContentId::from(next);
            }
            if next != index {
                log::debug!(
                    "Page {}: positional id {} is taken, using {}",
                    page_id,
                    index,
                    next
                );
            }
        }
        if !seen.insert(region.content_id.canonical()) {
            log::warn!(
                "Page {}: duplicate content id {}, keeping the first",
                page_id,
                region.content_id
            );
            continue;
        }
        regions.push(region);
    }

    regions
}

/// Returns the region and whether its id came from the payload.
fn normalize_region(page_id: u32, index: usize, item: &Value) -> Option<(Region, bool)> {
    let obj = item.as_object()?;
    let position = quad_from(first_field(obj, &POSITION_FIELDS)?)?;

    let payload_id = first_field(obj, &ID_FIELDS).and_then(content_id_from);
    let explicit = payload_id.is_some();
    let content_id = payload_id.unwrap_or_else(|| ContentId::from(index));
    let kind = str_field(obj, "type")
        .map(RegionType::from)
        .unwrap_or_default();

    let mut region = Region::new(content_id, page_id, kind, position);
    region.sub_type = str_field(obj, "sub_type").map(str::to_string);
    region.text = str_field(obj, "text").map(str::to_string);
    region.table = obj.get("cells").and_then(normalize_cells);
    region.image_ref = first_field(obj, &["image_url", "image_ref"])
        .and_then(Value::as_str)
        .map(str::to_string);
    region.outline_level = obj.get("outline_level").and_then(as_u32);
    region.label = str_field(obj, "render_text").map(str::to_string);
    region.clickable = !matches!(
        obj.get("active"),
        Some(v) if v.as_i64() == Some(0) || v.as_bool() == Some(false)
    );

    Some((region, explicit))
}

fn normalize_cells(value: &Value) -> Option<TableCells> {
    let list = value
        .get("cells")
        .and_then(Value::as_array)
        .or_else(|| value.as_array())?;
    let cells: Vec<TableCell> = list.iter().filter_map(normalize_cell).collect();
    (!cells.is_empty()).then(|| TableCells::new(cells))
}

fn normalize_cell(value: &Value) -> Option<TableCell> {
    let obj = value.as_object()?;
    let position = quad_from(first_field(obj, &POSITION_FIELDS)?)?;

    let row_index = obj.get("row_index").and_then(as_u32);
    let row = obj.get("row").and_then(as_u32);
    let col_index = obj.get("col_index").and_then(as_u32);
    let col = obj.get("col").and_then(as_u32);
    let span = |name: &str| {
        obj.get(name)
            .and_then(as_u32)
            .filter(|s| *s > 0)
            .unwrap_or(1)
    };

    Some(TableCell {
        position,
        row_index: row_index.or(row).unwrap_or(0),
        col_index: col_index.or(col).unwrap_or(0),
        row: row.or(row_index).unwrap_or(0),
        row_span: span("row_span"),
        col: col.or(col_index).unwrap_or(0),
        col_span: span("col_span"),
        cell_identity: obj.get("cell_id").and_then(scalar_string),
        text: str_field(obj, "text").map(str::to_string),
    })
}

fn first_field<'a>(obj: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .find_map(|name| obj.get(*name).filter(|v| !v.is_null()))
}

fn str_field<'a>(obj: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    obj.get(name).and_then(Value::as_str)
}

fn quad_from(value: &Value) -> Option<Quad> {
    let values = value.as_array()?;
    if values.len() != Quad::LEN {
        return None;
    }
    let coords: Option<Vec<f64>> = values.iter().map(Value::as_f64).collect();
    Quad::from_slice(&coords?)
}

fn content_id_from(value: &Value) -> Option<ContentId> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(ContentId::Number(i));
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                    Some(ContentId::Number(f as i64))
                }
                _ => Some(ContentId::Text(n.to_string())),
            }
        }
        Value::String(s) if !s.is_empty() => Some(ContentId::Text(s.clone())),
        _ => None,
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_u32(value: &Value) -> Option<u32> {
    if let Some(v) = value.as_u64() {
        return u32::try_from(v).ok();
    }
    value
        .as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u32::MAX as f64)
        .map(|f| f as u32)
}

fn finite_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|v| v.is_finite())
}

fn positive_number(value: Option<&Value>) -> Option<f64> {
    value
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite() && *v > 0.0)
}
