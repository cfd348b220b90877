use url::form_urlencoded::Serializer;

use super::state::Sort;
use crate::filter::FilterSet;

/// Build the query string for one page request.
///
/// Append order is a wire contract: `page`, `pageSize`, then `sortField` +
/// `sortOrder` when sorted, then `search` when a global filter is set, then
/// `filters[i][field]` / `filters[i][value]` / `filters[i][matchMode]` per
/// filter in set order.
pub(crate) fn build_query(
    page: u64,
    page_size: u64,
    sort: Option<&Sort>,
    filters: &FilterSet,
) -> String {
    let mut query = Serializer::new(String::new());

    query.append_pair("page", &page.to_string());
    query.append_pair("pageSize", &page_size.to_string());

    if let Some(sort) = sort {
        query.append_pair("sortField", &sort.field);
        query.append_pair("sortOrder", sort.order.as_str());
    }

    if !filters.global().is_empty() {
        query.append_pair("search", filters.global());
    }

    for (index, filter) in filters.iter().enumerate() {
        query.append_pair(&format!("filters[{}][field]", index), &filter.field);
        query.append_pair(&format!("filters[{}][value]", index), &filter.value.as_text());
        query.append_pair(
            &format!("filters[{}][matchMode]", index),
            filter.match_mode.as_str(),
        );
    }

    query.finish()
}
