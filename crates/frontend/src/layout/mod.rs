pub mod navigation;
pub mod sidebar;

use crate::shared::notifications::NotificationHost;
use leptos::prelude::*;
use sidebar::Sidebar;

/// Application shell
///
/// ```text
/// +------------------------------------+
/// |              top bar               |
/// +------------------------------------+
/// |  Sidebar  |        Content         |
/// +------------------------------------+
/// ```
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <div class="top-header">
                <span class="top-header__title">"Site admin"</span>
            </div>

            <div class="app-body">
                <div data-zone="left" class="left">
                    <Sidebar />
                </div>

                <div class="app-main">
                    <div data-zone="center" class="app-tabs" style="flex: 1; overflow: auto;">
                        {children()}
                    </div>
                </div>
            </div>

            <NotificationHost />
        </div>
    }
}
