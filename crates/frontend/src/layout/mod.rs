pub mod center;
pub mod global_context;
pub mod left;
pub mod modal_service;
pub mod tabs;
pub mod toast_service;
pub mod top_header;

use leptos::prelude::*;
use modal_service::ConfirmHost;
use toast_service::ToastHost;
use top_header::TopHeader;

/// Main application shell.
///
/// ```text
/// +------------------------------+
/// |          TopHeader           |
/// +------------------------------+
/// |  Sidebar  |  Tab bar + tabs  |
/// |   (Left)  |     (Center)     |
/// +------------------------------+
/// ```
///
/// Toasts and the confirm dialog are mounted once here, above every tab.
#[component]
pub fn Shell<L, C>(left: L, center: C) -> impl IntoView
where
    L: Fn() -> AnyView + 'static + Send,
    C: Fn() -> AnyView + 'static + Send,
{
    view! {
        <div class="app-layout">
            <TopHeader />

            <div class="app-body">
                <left::Left>
                    {left()}
                </left::Left>

                <div class="app-main">
                    <center::Center>
                        {center()}
                    </center::Center>
                </div>
            </div>

            <ToastHost />
            <ConfirmHost />
        </div>
    }
}
