use std::time::Duration;

use spdlog::{info, warn};

use crate::page::{is_bound, Element, PageView};

pub const PIX_PLACEHOLDER: &str = "COLE_SUA_CHAVE_PIX_AQUI";
pub const LABEL_IDLE: &str = "Copiar PIX";
pub const LABEL_COPIED: &str = "Copiado!";
pub const LABEL_FAILED: &str = "Não deu :(";
pub const LABEL_RESET_DELAY: Duration = Duration::from_millis(1200);

/// System clipboard of the embedding host. The ntex server does not provide one.
#[allow(async_fn_in_trait)]
pub trait Clipboard {
    async fn write_text(&self, text: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CopyOutcome {
    /// Key empty or still the placeholder.
    Skipped,
    Copied,
    Failed,
}

/// The "copy PIX key" button.
#[derive(Debug, Clone)]
pub struct PixCopy {
    reset_delay: Duration,
}

impl PixCopy {
    /// Present only when the page has the copy button.
    pub fn bind<V: PageView>(view: &V) -> Option<PixCopy> {
        if !is_bound(view, "PIX copy", &[Element::CopyPix]) {
            return None;
        }
        Some(PixCopy { reset_delay: LABEL_RESET_DELAY })
    }

    fn current_key<V: PageView>(view: &V) -> Option<String> {
        let key = view.value(Element::PixKey)?.trim().to_string();
        if key.is_empty() || key == PIX_PLACEHOLDER {
            return None;
        }
        Some(key)
    }

    /// Click handler. The button label changes and goes back to idle after a short delay.
    pub async fn on_click<V: PageView, C: Clipboard>(&self, view: &mut V, clipboard: &C) -> CopyOutcome {
        let Some(key) = Self::current_key(&*view) else {
            return CopyOutcome::Skipped;
        };

        let outcome = match clipboard.write_text(&key).await {
            Ok(()) => {
                info!("PIX key copied to the clipboard");
                view.set_text(Element::CopyPix, LABEL_COPIED.to_string());
                CopyOutcome::Copied
            }
            Err(e) => {
                warn!("Could not copy PIX key: {}", e);
                view.set_text(Element::CopyPix, LABEL_FAILED.to_string());
                CopyOutcome::Failed
            }
        };

        tokio::time::sleep(self.reset_delay).await;
        view.set_text(Element::CopyPix, LABEL_IDLE.to_string());
        outcome
    }
}
