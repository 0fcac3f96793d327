//! `--json` output.

use paramscan_core::Notice;
use paramscan_ifc::IfcDocument;
use paramscan_model::{ElementId, ElementSource, Query, SelectionControl, ViewControl, ViewKind};
use serde::Serialize;

/// State of the document after one request.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub file: String,
    pub schema: Option<&'a str>,
    pub active_view: ViewKind,
    pub elements: usize,
    pub query: &'a Query,
    pub notice: NoticeReport<'a>,
    pub selection: Vec<ElementId>,
    pub isolation: Option<Vec<ElementId>>,
}

#[derive(Debug, Serialize)]
pub struct NoticeReport<'a> {
    pub title: String,
    pub message: &'a str,
}

impl<'a> Report<'a> {
    pub fn new(file: String, doc: &'a IfcDocument, query: &'a Query, notice: &'a Notice) -> Self {
        Self {
            file,
            schema: doc.schema(),
            active_view: doc.active_view(),
            elements: doc.instance_elements().len(),
            query,
            notice: NoticeReport {
                title: notice.title.to_string(),
                message: &notice.message,
            },
            selection: doc.selection(),
            isolation: doc.temporary_isolation(),
        }
    }
}
