//! Sign-in / sign-up page

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::backend::{Backend, SharedBackend};
use crate::components::{Logo, LoadingSpinner};
use crate::error::Result;
use crate::types::{SignInRequest, SignUpMetadata, SignUpOutcome, SignUpRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Identifier,
    Phone,
    Password,
    ConfirmPassword,
    RememberMe,
}

const SIGN_IN_FIELDS: &[FormField] = &[
    FormField::Identifier,
    FormField::Password,
    FormField::RememberMe,
];

const SIGN_UP_FIELDS: &[FormField] = &[
    FormField::Identifier,
    FormField::Phone,
    FormField::Password,
    FormField::ConfirmPassword,
];

/// Copy that changes with the mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthCopy {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub identifier_label: &'static str,
    pub submit: &'static str,
    pub switch_prompt: &'static str,
    pub switch_action: &'static str,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        }
    }

    pub fn copy(self) -> AuthCopy {
        match self {
            AuthMode::SignIn => AuthCopy {
                title: "Welcome Back!",
                subtitle: "Sign in to continue",
                identifier_label: "Email",
                submit: "Sign In",
                switch_prompt: "Don't Have an account? ",
                switch_action: "Create a new account",
            },
            AuthMode::SignUp => AuthCopy {
                title: "Create Your Account",
                subtitle: "Join thousands of users",
                identifier_label: "Username or Email",
                submit: "Sign Up",
                switch_prompt: "Have an account? ",
                switch_action: "Log In Here!",
            },
        }
    }
}

/// Credential form contents. Switching modes never clears a value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthForm {
    pub identifier: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub remember_me: bool,
    pub mode: AuthMode,
}

/// What a submit asks the backend to do
#[derive(Debug, Clone, PartialEq)]
pub enum AuthRequest {
    SignIn(SignInRequest),
    SignUp(SignUpRequest),
}

/// Successful submit result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Authenticated,
    /// Account created, email confirmation pending
    ConfirmEmail,
}

impl AuthForm {
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    pub fn visible_fields(&self) -> &'static [FormField] {
        match self.mode {
            AuthMode::SignIn => SIGN_IN_FIELDS,
            AuthMode::SignUp => SIGN_UP_FIELDS,
        }
    }

    pub fn shows(&self, field: FormField) -> bool {
        self.visible_fields().contains(&field)
    }

    pub fn request(&self) -> AuthRequest {
        let email = self.identifier.trim().to_string();
        match self.mode {
            AuthMode::SignIn => AuthRequest::SignIn(SignInRequest {
                email,
                password: self.password.clone(),
                remember_me: self.remember_me,
            }),
            AuthMode::SignUp => {
                let phone = self.phone.trim();
                AuthRequest::SignUp(SignUpRequest {
                    email,
                    password: self.password.clone(),
                    data: SignUpMetadata {
                        phone: (!phone.is_empty()).then(|| phone.to_string()),
                    },
                })
            }
        }
    }
}

/// Exchange credentials with the backend.
pub async fn submit(backend: &dyn Backend, request: AuthRequest) -> Result<SubmitOutcome> {
    match request {
        AuthRequest::SignIn(request) => {
            backend.sign_in(&request).await?;
            Ok(SubmitOutcome::Authenticated)
        }
        AuthRequest::SignUp(request) => match backend.sign_up(&request).await? {
            SignUpOutcome::SignedIn(_) => Ok(SubmitOutcome::Authenticated),
            SignUpOutcome::ConfirmationRequired(_) => Ok(SubmitOutcome::ConfirmEmail),
        },
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Notice {
    Error(String),
    Info(String),
}

/// Authentication screen
#[component]
pub fn AuthView(
    backend: SharedBackend,
    /// Fired once the backend confirms the credentials
    #[prop(into)]
    on_success: Callback<()>,
    #[prop(into)] on_back: Callback<()>,
) -> impl IntoView {
    let form = RwSignal::new(AuthForm::default());
    let is_submitting = RwSignal::new(false);
    let notice = RwSignal::new(Option::<Notice>::None);

    let copy = Memo::new(move |_| form.with(|f| f.mode.copy()));
    let shows = move |field: FormField| form.with(|f| f.shows(field));

    // Handle form submission
    let backend_for_submit = backend.clone();
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }

        let request = form.with_untracked(AuthForm::request);
        let backend = backend_for_submit.clone();
        is_submitting.set(true);
        notice.set(None);

        spawn_local(async move {
            let result = submit(backend.as_ref(), request).await;
            is_submitting.set(false);

            match result {
                Ok(SubmitOutcome::Authenticated) => on_success.run(()),
                Ok(SubmitOutcome::ConfirmEmail) => notice.set(Some(Notice::Info(
                    "Check your email to confirm your account".to_string(),
                ))),
                Err(e) => {
                    tracing::warn!("Authentication failed: {}", e);
                    notice.set(Some(Notice::Error(e.user_message())));
                }
            }
        });
    };

    let backend_for_reset = backend.clone();
    let on_forgot_password = move |_| {
        let email = form.with_untracked(|f| f.identifier.trim().to_string());
        if email.is_empty() {
            notice.set(Some(Notice::Info(
                "Enter your email above, then tap Forgot Password".to_string(),
            )));
            return;
        }

        let backend = backend_for_reset.clone();
        spawn_local(async move {
            match backend.reset_password(&email).await {
                Ok(()) => notice.set(Some(Notice::Info(format!(
                    "Password reset instructions sent to {}",
                    email
                )))),
                Err(e) => {
                    tracing::warn!("Password recovery failed: {}", e);
                    notice.set(Some(Notice::Error(e.user_message())));
                }
            }
        });
    };

    view! {
        <div class="min-h-screen gradient-orange flex flex-col">
            // Header
            <div class="flex items-center justify-between p-6">
                <button
                    on:click=move |_| on_back.run(())
                    class="text-white/80 hover:text-white transition-smooth"
                    aria-label="Back"
                >
                    "←"
                </button>
                <Logo class="w-12 h-12" />
            </div>

            <div class="flex-1 flex flex-col justify-center px-6 pb-12">
                <div class="max-w-sm mx-auto w-full">
                    <div class="text-center mb-8">
                        <h1 class="text-2xl font-bold text-white mb-2">{move || copy.get().title}</h1>
                        <p class="text-white/80 text-sm">{move || copy.get().subtitle}</p>
                    </div>

                    {move || notice.get().map(|notice| match notice {
                        Notice::Error(msg) => view! {
                            <div class="mb-4 p-3 rounded-lg bg-red-50 text-red-700 text-sm">{msg}</div>
                        }.into_any(),
                        Notice::Info(msg) => view! {
                            <div class="mb-4 p-3 rounded-lg bg-white/90 text-foreground text-sm">{msg}</div>
                        }.into_any(),
                    })}

                    <form on:submit=on_submit class="space-y-4">
                        <div class="space-y-2">
                            <label for="email" class="text-white font-medium">
                                {move || copy.get().identifier_label}
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="Username or Email"
                                prop:value=move || form.with(|f| f.identifier.clone())
                                on:input=move |ev| form.update(|f| f.identifier = event_target_value(&ev))
                                required=true
                                class="input bg-white/90 border-0"
                            />
                        </div>

                        <Show when=move || shows(FormField::Phone)>
                            <div class="space-y-2">
                                <label for="phone" class="text-white font-medium">"Phone"</label>
                                <input
                                    id="phone"
                                    type="tel"
                                    placeholder="Phone"
                                    prop:value=move || form.with(|f| f.phone.clone())
                                    on:input=move |ev| form.update(|f| f.phone = event_target_value(&ev))
                                    required=true
                                    class="input bg-white/90 border-0"
                                />
                            </div>
                        </Show>

                        <div class="space-y-2">
                            <label for="password" class="text-white font-medium">"Password"</label>
                            <input
                                id="password"
                                type="password"
                                placeholder="Enter Password"
                                prop:value=move || form.with(|f| f.password.clone())
                                on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                                required=true
                                class="input bg-white/90 border-0"
                            />
                        </div>

                        <Show when=move || shows(FormField::ConfirmPassword)>
                            <div class="space-y-2">
                                <label for="confirmPassword" class="text-white font-medium">
                                    "Confirm Password"
                                </label>
                                <input
                                    id="confirmPassword"
                                    type="password"
                                    placeholder="Enter Password"
                                    prop:value=move || form.with(|f| f.confirm_password.clone())
                                    on:input=move |ev| form.update(|f| f.confirm_password = event_target_value(&ev))
                                    required=true
                                    class="input bg-white/90 border-0"
                                />
                            </div>
                        </Show>

                        <Show when=move || shows(FormField::RememberMe)>
                            <div class="flex items-center justify-between">
                                <label class="flex items-center space-x-2 text-white text-sm">
                                    <input
                                        type="checkbox"
                                        prop:checked=move || form.with(|f| f.remember_me)
                                        on:change=move |ev| form.update(|f| f.remember_me = event_target_checked(&ev))
                                    />
                                    <span>"Remember me"</span>
                                </label>
                                <button
                                    type="button"
                                    on:click=on_forgot_password.clone()
                                    class="text-white text-sm hover:underline"
                                >
                                    "Forgot Password"
                                </button>
                            </div>
                        </Show>

                        <button
                            type="submit"
                            disabled=move || is_submitting.get()
                            class="btn w-full bg-white text-primary shadow-lg font-bold text-lg py-6"
                        >
                            <Show when=move || is_submitting.get()>
                                <LoadingSpinner />
                            </Show>
                            {move || copy.get().submit}
                        </button>
                    </form>

                    <div class="text-center mt-6">
                        <span class="text-white text-sm">{move || copy.get().switch_prompt}</span>
                        <button
                            on:click=move |_| {
                                form.update(AuthForm::toggle_mode);
                                notice.set(None);
                            }
                            class="text-white text-sm font-semibold hover:underline"
                        >
                            {move || copy.get().switch_action}
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
