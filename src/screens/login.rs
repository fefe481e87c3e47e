//! Login Screen
//!
//! Email + phone login against the user lookup, and self-registration.

use chrono::{Local, NaiveDate};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::api::{create_user, get_user, Ack, ApiResult, Transport};
use crate::components::{alert, StatusMessage};
use crate::context::use_app_context;
use crate::forms::{LoginForm, RegistrationForm};
use crate::models::User;
use crate::routes::Screen;

// ===== Outcomes =====

#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    LoggedIn(User),
    Registered(Ack),
    WrongCredentials,
    UnknownUser,
}

impl AuthOutcome {
    /// Where the app goes next, if anywhere
    pub fn destination(&self) -> Option<Screen> {
        match self {
            AuthOutcome::LoggedIn(_) | AuthOutcome::Registered(_) => Some(Screen::Restaurants),
            AuthOutcome::WrongCredentials | AuthOutcome::UnknownUser => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AuthOutcome::LoggedIn(user) => format!("Bienvenido, {}", user.name),
            AuthOutcome::Registered(ack) => match &ack.id {
                Some(id) => format!("Usuario registrado con ID: {}", id),
                None => "Usuario registrado".to_string(),
            },
            AuthOutcome::WrongCredentials => "Correo o teléfono incorrecto".to_string(),
            AuthOutcome::UnknownUser => "Usuario no encontrado".to_string(),
        }
    }
}

/// The phone number acts as the password
pub async fn login(api: &dyn Transport, form: &LoginForm) -> ApiResult<AuthOutcome> {
    let (email, phone) = form.credentials()?;
    match get_user(api, &email).await {
        Ok(user) if user.phone.trim() == phone => {
            tracing::info!(%email, "logged in");
            Ok(AuthOutcome::LoggedIn(user))
        }
        Ok(_) => Ok(AuthOutcome::WrongCredentials),
        Err(err) if err.is_not_found() => Ok(AuthOutcome::UnknownUser),
        Err(err) => Err(err),
    }
}

pub async fn register(api: &dyn Transport, form: &RegistrationForm, today: NaiveDate) -> ApiResult<AuthOutcome> {
    let user = form.validate(today)?;
    // Nothing on this screen lists users
    let ack = create_user(api, &user).await?.into_inner();
    Ok(AuthOutcome::Registered(ack))
}

// ===== Component =====

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Login,
    Register,
}

#[component]
pub fn LoginScreen() -> impl IntoView {
    let ctx = use_app_context();
    let navigate = StoredValue::new_local(use_navigate());

    let (mode, set_mode) = signal(Mode::Login);
    let login_form = RwSignal::new(LoginForm::default());
    let register_form = RwSignal::new(RegistrationForm::default());
    let (message, set_message) = signal(None::<String>);
    let (busy, set_busy) = signal(false);

    let finish = move |result: ApiResult<AuthOutcome>| match result {
        Ok(outcome) => match outcome.destination() {
            Some(screen) => {
                if matches!(outcome, AuthOutcome::Registered(_)) {
                    alert(&outcome.message());
                }
                navigate.with_value(|nav| nav(&screen.path(), Default::default()));
            }
            None => set_message.set(Some(outcome.message())),
        },
        Err(err) => {
            tracing::warn!("authentication failed: {}", err);
            set_message.set(Some(err.user_message("No se pudo contactar al servidor")));
        }
    };

    let on_login = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let api = ctx.transport();
        let form = login_form.get_untracked();
        set_busy.set(true);
        set_message.set(None);
        spawn_local(async move {
            let result = login(&api, &form).await;
            set_busy.set(false);
            finish(result);
        });
    };

    let on_register = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let api = ctx.transport();
        let form = register_form.get_untracked();
        set_busy.set(true);
        set_message.set(None);
        spawn_local(async move {
            let result = register(&api, &form, Local::now().date_naive()).await;
            set_busy.set(false);
            finish(result);
        });
    };

    let switch_mode = move |_| {
        set_message.set(None);
        set_mode.update(|m| {
            *m = match m {
                Mode::Login => Mode::Register,
                Mode::Register => Mode::Login,
            }
        });
    };

    view! {
        <div class="login-screen">
            <h1>{move || if mode.get() == Mode::Login { "Iniciar sesión" } else { "Registrarse" }}</h1>

            <Show when=move || mode.get() == Mode::Login>
                <form class="auth-form" on:submit=on_login>
                    <input
                        type="email"
                        placeholder="Correo"
                        prop:value=move || login_form.with(|f| f.email.clone())
                        on:input=move |ev| login_form.update(|f| f.email = event_target_value(&ev))
                    />
                    <input
                        type="text"
                        placeholder="Teléfono"
                        prop:value=move || login_form.with(|f| f.phone.clone())
                        on:input=move |ev| login_form.update(|f| f.phone = event_target_value(&ev))
                    />
                    <button type="submit" disabled=move || busy.get()>"Entrar"</button>
                </form>
            </Show>

            <Show when=move || mode.get() == Mode::Register>
                <form class="auth-form" on:submit=on_register>
                    <input
                        type="text"
                        placeholder="Nombre"
                        prop:value=move || register_form.with(|f| f.name.clone())
                        on:input=move |ev| register_form.update(|f| f.name = event_target_value(&ev))
                    />
                    <input
                        type="email"
                        placeholder="Correo"
                        prop:value=move || register_form.with(|f| f.email.clone())
                        on:input=move |ev| register_form.update(|f| f.email = event_target_value(&ev))
                    />
                    <input
                        type="text"
                        placeholder="Teléfono"
                        prop:value=move || register_form.with(|f| f.phone.clone())
                        on:input=move |ev| register_form.update(|f| f.phone = event_target_value(&ev))
                    />
                    <input
                        type="text"
                        placeholder="Municipio"
                        prop:value=move || register_form.with(|f| f.municipality.clone())
                        on:input=move |ev| register_form.update(|f| f.municipality = event_target_value(&ev))
                    />
                    <input
                        type="text"
                        placeholder="Dirección"
                        prop:value=move || register_form.with(|f| f.branch.clone())
                        on:input=move |ev| register_form.update(|f| f.branch = event_target_value(&ev))
                    />
                    <div class="coordinates">
                        <input
                            type="text"
                            placeholder="Latitud"
                            prop:value=move || register_form.with(|f| f.latitude.clone())
                            on:input=move |ev| register_form.update(|f| f.latitude = event_target_value(&ev))
                        />
                        <input
                            type="text"
                            placeholder="Longitud"
                            prop:value=move || register_form.with(|f| f.longitude.clone())
                            on:input=move |ev| register_form.update(|f| f.longitude = event_target_value(&ev))
                        />
                    </div>
                    <button type="submit" disabled=move || busy.get()>"Registrarse"</button>
                </form>
            </Show>

            <StatusMessage message=message />

            <button class="link-btn" on:click=switch_mode>
                {move || if mode.get() == Mode::Login {
                    "¿No tienes cuenta? Regístrate"
                } else {
                    "¿Ya tienes cuenta? Inicia sesión"
                }}
            </button>
        </div>
    }
}
