//! Toast notifications for failed commands and short notices.

use std::error::Error;

use irrigo_domain::error::ClientError;
use leptos::prelude::*;
use leptos::task::spawn_local;

const TOAST_MS: u32 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Error,
}

impl ToastLevel {
    fn class(self) -> &'static str {
        match self {
            Self::Info => "toast toast-info",
            Self::Error => "toast toast-error",
        }
    }
}

/// A single toast message.
#[derive(Debug, Clone)]
pub struct ToastMessage {
    /// Unique id for keyed rendering.
    pub id: u32,
    pub level: ToastLevel,
    pub text: String,
}

/// Reactive context providing toast mutation methods.
#[derive(Clone, Copy)]
pub struct ToastProvider {
    set_toasts: WriteSignal<Vec<ToastMessage>>,
    next_id: RwSignal<u32>,
}

impl ToastProvider {
    /// Show a toast that dismisses itself after a few seconds.
    pub fn push(&self, level: ToastLevel, text: String) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id.wrapping_add(1));
        self.set_toasts
            .update(|list| list.push(ToastMessage { id, level, text }));

        let set_toasts = self.set_toasts;
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_MS).await;
            set_toasts.update(|list| list.retain(|t| t.id != id));
        });
    }

    pub fn info(&self, text: impl Into<String>) {
        self.push(ToastLevel::Info, text.into());
    }

    /// Surface a failed command. Rejected input is only logged; the form
    /// stays open for correction.
    pub fn report(&self, err: &ClientError) {
        if let ClientError::Validation(reason) = err {
            tracing::debug!(%reason, "input rejected");
            return;
        }
        let mut text = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            text.push_str(": ");
            text.push_str(&cause.to_string());
            source = cause.source();
        }
        tracing::warn!(error = %text, "command failed");
        self.push(ToastLevel::Error, text);
    }

    /// Dismiss a toast immediately by id.
    pub fn dismiss(&self, id: u32) {
        self.set_toasts.update(|list| list.retain(|t| t.id != id));
    }
}

/// Access the toast provider from Leptos context.
///
/// Must be called within a component tree that has a [`ToastContainer`] ancestor.
pub fn use_toasts() -> ToastProvider {
    use_context::<ToastProvider>().expect("ToastProvider not found in context")
}

/// Provides toast context to `children` and renders the active toasts.
#[component]
pub fn ToastContainer(children: Children) -> impl IntoView {
    let (toasts, set_toasts) = signal(Vec::<ToastMessage>::new());
    let provider = ToastProvider {
        set_toasts,
        next_id: RwSignal::new(0),
    };
    provide_context(provider);

    view! {
        {children()}
        <div class="toast-container">
            {move || {
                toasts
                    .get()
                    .into_iter()
                    .map(|toast| {
                        let id = toast.id;
                        view! {
                            <div class=toast.level.class()>
                                <button class="toast-dismiss" on:click=move |_| provider.dismiss(id)>
                                    "\u{00D7}"
                                </button>
                                {toast.text}
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
