//! Sidebar with collapsible resource groups

use crate::layout::navigation::{use_navigation, Page};
use crate::shared::icons::icon;
use contracts::domain::common::ResourceKind;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<ResourceKind>,
}

fn menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "content",
            label: "Content",
            icon: "blog",
            items: vec![
                ResourceKind::Blog,
                ResourceKind::News,
                ResourceKind::Service,
                ResourceKind::Project,
                ResourceKind::AboutSection,
                ResourceKind::Course,
                ResourceKind::Testimonial,
            ],
        },
        MenuGroup {
            id: "inbox",
            label: "Inbox",
            icon: "inbox",
            items: vec![ResourceKind::Contact, ResourceKind::Consultation],
        },
        MenuGroup {
            id: "settings",
            label: "Site settings",
            icon: "settings",
            items: vec![
                ResourceKind::Redirect,
                ResourceKind::Statistic,
                ResourceKind::ContactInfo,
            ],
        },
    ]
}

fn item_icon(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Blog => "blog",
        ResourceKind::News => "news",
        ResourceKind::Service | ResourceKind::Project => "briefcase",
        ResourceKind::AboutSection => "layers",
        ResourceKind::Course => "book",
        ResourceKind::Testimonial | ResourceKind::Contact | ResourceKind::Consultation => "message",
        ResourceKind::Redirect | ResourceKind::Statistic | ResourceKind::ContactInfo => "settings",
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let navigation = use_navigation();
    let groups = menu_groups();
    let expanded_groups = RwSignal::new(groups.iter().map(|g| g.id).collect::<Vec<_>>());

    view! {
        <div class="app-sidebar__content">
            {groups.into_iter().map(|group| {
                let group_id = group.id;
                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            style:padding-left="12px"
                            on:click=move |_| {
                                expanded_groups.update(|ids| {
                                    if let Some(pos) = ids.iter().position(|id| *id == group_id) {
                                        ids.remove(pos);
                                    } else {
                                        ids.push(group_id);
                                    }
                                });
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=move || expanded_groups.get().contains(&group_id)
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>

                        <Show when=move || expanded_groups.get().contains(&group_id)>
                            <div class="app-sidebar__children">
                                {group.items.clone().into_iter().map(|kind| view! {
                                    <div
                                        class="app-sidebar__item"
                                        class:app-sidebar__item--active=move || navigation.page().kind() == kind
                                        style:padding-left="10px"
                                        on:click=move |_| navigation.go(Page::List(kind))
                                    >
                                        <div class="app-sidebar__item-content">
                                            {icon(item_icon(kind))}
                                            <span>{kind.title()}</span>
                                        </div>
                                    </div>
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}
