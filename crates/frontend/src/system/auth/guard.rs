use contracts::system::users::User;
use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_location;

use super::context::use_auth;

pub const LOGIN_ROUTE: &str = "/auth/login";
pub const HOME_ROUTE: &str = "/dashboard";

/// Решение охранника маршрута
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    Redirect(String),
}

/// Переход на вход с возвратом на исходный адрес
pub fn login_redirect(return_url: &str) -> String {
    format!(
        "{}?returnUrl={}",
        LOGIN_ROUTE,
        urlencoding::encode(return_url)
    )
}

/// Доступ только для вошедших пользователей
pub fn auth_guard(user: Option<&User>, url: &str) -> GuardOutcome {
    match user {
        Some(_) => GuardOutcome::Allow,
        None => GuardOutcome::Redirect(login_redirect(url)),
    }
}

/// Доступ только для администраторов; остальные вошедшие уходят на главную
pub fn admin_guard(user: Option<&User>, url: &str) -> GuardOutcome {
    match user {
        Some(u) if u.is_admin() => GuardOutcome::Allow,
        Some(_) => GuardOutcome::Redirect(HOME_ROUTE.to_string()),
        None => GuardOutcome::Redirect(login_redirect(url)),
    }
}

fn current_url() -> impl Fn() -> String + Copy {
    let location = use_location();
    let (pathname, search) = (location.pathname, location.search);
    move || {
        let search = search.get();
        if search.is_empty() {
            pathname.get()
        } else {
            format!("{}?{}", pathname.get(), search.trim_start_matches('?'))
        }
    }
}

fn redirect_view(outcome: GuardOutcome) -> AnyView {
    match outcome {
        GuardOutcome::Redirect(path) => view! { <Redirect path=path/> }.into_any(),
        GuardOutcome::Allow => ().into_any(),
    }
}

/// Component that requires authentication
/// Redirects to login (with return URL) if not authenticated
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let url = current_url();
    let outcome = move || auth.user.with(|u| auth_guard(u.as_ref(), &url()));

    view! {
        <Show
            when=move || outcome() == GuardOutcome::Allow
            fallback=move || redirect_view(outcome())
        >
            {children()}
        </Show>
    }
}

/// Component that requires admin privileges
/// Redirects non-admins to the dashboard and anonymous users to login
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let url = current_url();
    let outcome = move || auth.user.with(|u| admin_guard(u.as_ref(), &url()));

    view! {
        <Show
            when=move || outcome() == GuardOutcome::Allow
            fallback=move || redirect_view(outcome())
        >
            {children()}
        </Show>
    }
}
