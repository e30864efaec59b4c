use contracts::system::users::User;
use leptos::prelude::*;

use super::session::Session;
use crate::shared::config::ClientConfig;

/// Контекст аутентификации в дереве компонентов
///
/// `user` зеркалирует `Session::current_user_store` в реактивный сигнал.
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub session: StoredValue<Session, LocalStorage>,
    pub user: RwSignal<Option<User>>,
}

impl AuthContext {
    pub fn session(&self) -> Session {
        self.session.get_value()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.with(Option::is_some)
    }

    pub fn is_admin(&self) -> bool {
        self.user
            .with(|u| u.as_ref().is_some_and(User::is_admin))
    }
}

/// Auth context provider component
///
/// Сессия восстанавливается из `localStorage` при монтировании.
#[component]
pub fn AuthProvider(
    #[prop(optional)] config: Option<ClientConfig>,
    children: ChildrenFn,
) -> impl IntoView {
    let session = Session::browser(config.unwrap_or_default());
    let user = RwSignal::new(session.current_user());

    let subscription = session
        .current_user_store()
        .subscribe(move |current| user.set(current.clone()));
    let subscription = StoredValue::new_local(Some(subscription));
    on_cleanup(move || {
        if let Some(Some(subscription)) = subscription.try_update_value(Option::take) {
            subscription.unsubscribe();
        }
    });

    provide_context(AuthContext {
        session: StoredValue::new_local(session),
        user,
    });

    children()
}

/// Hook to access auth context
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthProvider not found in component tree")
}

/// Текущая сессия (клон разделяет состояние)
pub fn use_session() -> Session {
    use_auth().session()
}
