//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the composition root. It builds the config, API client, session
//! store and auth controller once, provides them as context, and mirrors
//! controller transitions into an `RwSignal<AuthState>` for the view layer.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::footer::Footer;
use crate::components::navbar::Navbar;
use crate::components::protected_route::ProtectedRoute;
use crate::config::ClientConfig;
use crate::net::api::ApiClient;
use crate::net::transport::default_transport;
use crate::pages::{
    create_post::CreatePostPage, home::HomePage, login::LoginPage, post::ViewPostPage, signup::SignupPage,
};
use crate::state::controller::AuthController;
use crate::state::session::SessionStore;
use crate::util::token_storage::default_token_storage;

/// Root application component.
///
/// Provides all shared contexts, starts session verification, and sets up
/// client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env();
    let api = ApiClient::new(config.api_base.clone(), default_transport());
    let store = SessionStore::new(default_token_storage(&config.token_key));
    let controller = AuthController::new(api.clone(), store);

    // Controller transitions drive the reactive auth snapshot.
    let auth = RwSignal::new(controller.state());
    let subscription = controller.subscribe(move |state| auth.set(state.clone()));
    let subscribed = controller.clone();
    on_cleanup(move || {
        subscribed.unsubscribe(subscription);
    });

    provide_context(config.clone());
    provide_context(api);
    provide_context(controller.clone());
    provide_context(auth);

    leptos::task::spawn_local(async move { controller.start().await });

    view! {
        <Title text=config.app_name.clone()/>

        <Router>
            <Navbar/>
            <main class="app-main">
                <Routes fallback=|| view! { <p class="status">"Page not found."</p> }>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=(StaticSegment("post"), ParamSegment("id")) view=ViewPostPage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("signup") view=SignupPage/>
                    <Route
                        path=StaticSegment("create-post")
                        view=|| view! { <ProtectedRoute><CreatePostPage/></ProtectedRoute> }
                    />
                </Routes>
            </main>
            <Footer app_name=config.app_name/>
        </Router>
    }
}
