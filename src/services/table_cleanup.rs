use html_escape::encode_double_quoted_attribute;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Node, Selector};

static TABLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("table").unwrap());
static CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("th, td").unwrap());
static IMG_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("img[alt]").unwrap());

pub const NOISE_LABELS: [&str; 2] = ["도움말", "닫기"];
pub const EXTRACTED_TABLE_CLASS: &str = "extracted-table";

const BOUNDARY_TAGS: [&str; 4] = ["table", "body", "html", "tr"];
const CONTAINER_TAGS: [&str; 4] = ["a", "button", "span", "div"];
const MAX_ANCESTOR_DEPTH: usize = 8;

pub fn stripped_text(element: ElementRef) -> String {
    element.text().map(str::trim).collect()
}

fn contains_any(element: ElementRef, labels: &[&str]) -> bool {
    let text: String = element.text().collect();
    labels.iter().any(|label| text.contains(label))
}

/// `Some(None)` when the label cell is the last one in its row.
pub fn cell_after_label<'a>(
    row: ElementRef<'a>,
    labels: &[&str],
) -> Option<Option<ElementRef<'a>>> {
    let cells: Vec<ElementRef> = row.select(&CELL_SELECTOR).collect();
    let position = cells.iter().position(|cell| contains_any(*cell, labels))?;

    Some(cells.get(position + 1).copied())
}

// Later label cells win over earlier ones.
pub fn value_after_label(scope: ElementRef, labels: &[&str]) -> Option<String> {
    scope
        .select(&CELL_SELECTOR)
        .filter(|cell| {
            let text = stripped_text(*cell);
            labels.iter().any(|label| text.contains(label))
        })
        .filter_map(|cell| {
            cell.next_siblings()
                .filter_map(ElementRef::wrap)
                .filter(|sibling| sibling.value().name() == "td")
                .last()
        })
        .last()
        .map(stripped_text)
}

// Best effort: restructured markup can leave noise behind or lose content.
pub fn sanitize_status_table(table_html: &str) -> String {
    let mut fragment = Html::parse_fragment(table_html);

    let doomed: Vec<_> = match fragment.select(&TABLE_SELECTOR).next() {
        Some(table) => noise_elements(table).into_iter().map(|el| (*el).id()).collect(),
        None => return table_html.to_string(),
    };

    for id in doomed {
        if let Some(mut node) = fragment.tree.get_mut(id) {
            node.detach();
        }
    }

    match fragment.select(&TABLE_SELECTOR).next() {
        Some(table) => serialize_with_class(table, EXTRACTED_TABLE_CLASS),
        None => table_html.to_string(),
    }
}

fn noise_elements(table: ElementRef) -> Vec<ElementRef> {
    let mut doomed = Vec::new();

    for label in NOISE_LABELS {
        for node in table.descendants() {
            let Node::Text(text) = node.value() else {
                continue;
            };
            if !text.contains(label) {
                continue;
            }

            let container = node
                .ancestors()
                .filter_map(ElementRef::wrap)
                .take_while(|el| !BOUNDARY_TAGS.contains(&el.value().name()))
                .take(MAX_ANCESTOR_DEPTH)
                .find(|el| {
                    CONTAINER_TAGS.contains(&el.value().name()) && contains_any(*el, &[label])
                });

            if let Some(container) = container {
                doomed.push(container);
            }
        }

        for img in table.select(&IMG_SELECTOR) {
            if img.value().attr("alt").is_some_and(|alt| alt.contains(label)) {
                doomed.push(img);
            }
        }
    }

    doomed
}

fn serialize_with_class(table: ElementRef, class: &str) -> String {
    let element = table.value();
    let mut classes: Vec<&str> = element.classes().collect();
    classes.push(class);

    let mut html = String::from("<table");
    html.push_str(&format!(
        " class=\"{}\"",
        encode_double_quoted_attribute(&classes.join(" "))
    ));
    for (name, value) in element.attrs().filter(|(name, _)| *name != "class") {
        html.push_str(&format!(
            " {}=\"{}\"",
            name,
            encode_double_quoted_attribute(value)
        ));
    }
    html.push('>');
    html.push_str(&table.inner_html());
    html.push_str("</table>");
    html
}
