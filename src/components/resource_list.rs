// src/components/resource_list.rs
use crate::resources::{ResourceListing, ResourceRow, EMPTY_LISTING_TEXT};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ResourceListProps {
    pub listing: ResourceListing,
}

/// Items of the scene's resource list. Mounted directly into the `<ul>`.
#[function_component(ResourceList)]
pub fn resource_list(props: &ResourceListProps) -> Html {
    match &props.listing {
        ResourceListing::Empty => html! {
            <li class="muted">{EMPTY_LISTING_TEXT}</li>
        },
        ResourceListing::Rows(rows) => rows.iter().map(render_row).collect::<Html>(),
    }
}

fn render_row(row: &ResourceRow) -> Html {
    let (target, rel) = if row.opens_new_context {
        (Some("_blank"), Some("noreferrer"))
    } else {
        (None, None)
    };

    html! {
        <li>
            <a href={row.href.clone()} {target} {rel}>{row.label.clone()}</a>
            <small class="muted">{format!(" ({})", row.areas)}</small>
        </li>
    }
}
