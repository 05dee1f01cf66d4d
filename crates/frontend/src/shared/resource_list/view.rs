use super::state::ListState;
use crate::domain::list_columns;
use crate::layout::navigation::{use_navigation, Page};
use crate::shared::api::RestResourceApi;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::config::config;
use crate::shared::form_engine::{Notifier, ResourceApi};
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use contracts::domain::common::{ResourceKind, ResourceRecord};
use contracts::shared::Lang;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{Button, ButtonAppearance, ButtonSize, Flex, FlexGap, Spinner, SpinnerSize};

#[component]
pub fn ResourceList(kind: ResourceKind) -> impl IntoView {
    let navigation = use_navigation();
    let notifications = use_notifications();
    let api = RestResourceApi::new(kind);
    let columns = list_columns(kind);

    let state = RwSignal::new(ListState::new(config().languages.default));
    // Records paired with the language they were loaded in
    let items = RwSignal::new(Vec::<(Lang, ResourceRecord)>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let fetch = move || {
        let Some(query) = state.try_with_untracked(|s| s.query()) else {
            return;
        };
        set_loading.set(true);
        spawn_local(async move {
            match api.list(&query).await {
                Ok(response) => {
                    let _ = state.try_update(|s| s.apply_totals(response.total_items, response.total_pages));
                    let rows = response.data.into_iter().map(|r| (query.lang, r)).collect();
                    let _ = items.try_set(rows);
                    let _ = set_error.try_set(None);
                }
                Err(e) => {
                    log::warn!("failed to load {} list: {}", kind, e);
                    let _ = set_error.try_set(Some(e.user_message()));
                }
            }
            let _ = set_loading.try_set(false);
        });
    };

    // Reload whenever the page or the language changes
    let query = Memo::new(move |_| state.with(|s| s.query()));
    Effect::new(move |_| {
        query.track();
        fetch();
    });

    let delete = move |record_id: i64| {
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message(&format!("Delete record #{}?", record_id))
                    .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match api.delete(record_id).await {
                Ok(()) => {
                    log::info!("{} #{} deleted", kind, record_id);
                    notifications.success("Deleted successfully");
                    fetch();
                }
                Err(e) => notifications.error(&format!("Delete failed: {}", e.user_message())),
            }
        });
    };

    let list_lang = Signal::derive(move || state.with(|s| s.lang));

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{kind.title()}</h1>
                </div>
                <div class="header__actions">
                    {kind.has_form().then(|| view! {
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| navigation.go(Page::Create(kind))
                        >
                            {icon("plus")}
                            "Create"
                        </Button>
                    })}
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| fetch()
                    >
                        {icon("refresh")}
                        "Refresh"
                    </Button>
                </div>
            </div>

            <Flex gap=FlexGap::Small>
                {Lang::ALL
                    .into_iter()
                    .map(|lang| view! {
                        <Button
                            appearance=Signal::derive(move || {
                                if list_lang.get() == lang {
                                    ButtonAppearance::Primary
                                } else {
                                    ButtonAppearance::Subtle
                                }
                            })
                            size=ButtonSize::Small
                            on_click=move |_| state.update(|s| s.set_lang(lang))
                        >
                            {lang.label()}
                        </Button>
                    })
                    .collect_view()}
            </Flex>

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <Show when=move || loading.get()>
                <Spinner size=SpinnerSize::Small />
            </Show>

            <table class="table">
                <thead>
                    <tr>
                        <th class="table__cell">"ID"</th>
                        {columns
                            .iter()
                            .map(|column| view! { <th class="table__cell">{column.label}</th> })
                            .collect_view()}
                        <th class="table__cell"></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || items.get()
                        key=|(lang, record)| (record.id, *lang)
                        children=move |(lang, record)| {
                            let record_id = record.id;
                            view! {
                                <tr class="table__row">
                                    <td class="table__cell">{record_id}</td>
                                    {columns
                                        .iter()
                                        .map(|column| view! {
                                            <td class="table__cell">{column.cell(&record, lang)}</td>
                                        })
                                        .collect_view()}
                                    <td class="table__cell table__cell--actions">
                                        {kind.has_form().then(|| view! {
                                            <Button
                                                appearance=ButtonAppearance::Subtle
                                                size=ButtonSize::Small
                                                on_click=move |_| navigation.go(Page::Edit(kind, record_id))
                                            >
                                                {icon("edit")}
                                            </Button>
                                        })}
                                        <Button
                                            appearance=ButtonAppearance::Subtle
                                            size=ButtonSize::Small
                                            on_click=move |_| delete(record_id)
                                        >
                                            {icon("trash")}
                                        </Button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            <PaginationControls
                current_page=Signal::derive(move || state.with(|s| s.page))
                total_pages=Signal::derive(move || state.with(|s| s.total_pages))
                total_count=Signal::derive(move || state.with(|s| s.total_items))
                on_page_change=Callback::new(move |page: u32| {
                    state.update(|s| {
                        s.go_to(page);
                    });
                })
            />
        </div>
    }
}
