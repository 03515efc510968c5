use leptos::prelude::*;

/// Grey rows shown until the first page arrives
#[component]
pub fn SkeletonRows(rows: usize, columns: usize) -> impl IntoView {
    (0..rows)
        .map(|_| {
            view! {
                <tr class="skeleton-row">
                    {(0..columns).map(|_| view! { <td><span class="skeleton"></span></td> }).collect_view()}
                </tr>
            }
        })
        .collect_view()
}
