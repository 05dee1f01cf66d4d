use crate::domain;
use crate::layout::navigation::{use_navigation, AppNavigation, Page};
use crate::layout::Shell;
use crate::shared::multilingual_form::MultilingualForm;
use crate::shared::notifications::NotificationService;
use crate::shared::resource_list::ResourceList;
use contracts::domain::common::ResourceKind;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Current page lives in the URL query
    let navigation = AppNavigation::new();
    navigation.init_url_sync();
    provide_context(navigation);

    provide_context(NotificationService::new());

    view! {
        <Shell>
            <CurrentPage />
        </Shell>
    }
}

#[component]
fn CurrentPage() -> impl IntoView {
    let navigation = use_navigation();
    let page = Memo::new(move |_| navigation.page());

    move || match page.get() {
        Page::List(kind) => view! { <ResourceList kind=kind /> }.into_any(),
        Page::Create(kind) => form_page(kind, None),
        Page::Edit(kind, id) => form_page(kind, Some(id)),
    }
}

fn form_page(kind: ResourceKind, id: Option<i64>) -> AnyView {
    match domain::descriptor(kind) {
        Some(descriptor) => view! { <MultilingualForm descriptor=descriptor id=id /> }.into_any(),
        None => {
            log::warn!("{} has no edit form", kind);
            view! { <ResourceList kind=kind /> }.into_any()
        }
    }
}
