use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;

use crate::{LeadForm, SubmissionState, SubmissionStrategy};

/// Live form instances keyed by the form id embedded in each rendered page.
#[derive(Clone)]
pub struct LeadForms {
    strategy: Arc<dyn SubmissionStrategy>,
    forms: Arc<Mutex<HashMap<String, Arc<LeadForm>>>>,
    capacity: usize,
}

impl LeadForms {
    pub fn new(strategy: Arc<dyn SubmissionStrategy>, capacity: usize) -> Self {
        Self {
            strategy,
            forms: Arc::new(Mutex::new(HashMap::new())),
            capacity,
        }
    }

    pub fn strategy(&self) -> &Arc<dyn SubmissionStrategy> {
        &self.strategy
    }

    /// Form registered under `id`, created on first use.
    ///
    /// When the registry is full, settled forms are evicted first. If every
    /// tracked form is still pending the returned form is not tracked.
    pub async fn open(&self, id: &str) -> Arc<LeadForm> {
        let mut forms = self.forms.lock().await;
        if let Some(form) = forms.get(id) {
            return form.clone();
        }

        let form = Arc::new(LeadForm::new(self.strategy.clone()));

        if forms.len() >= self.capacity {
            let mut settled = Vec::new();
            for (key, form) in forms.iter() {
                if form.state().await != SubmissionState::Pending {
                    settled.push(key.to_owned());
                }
            }

            tracing::warn!(
                tracked = forms.len(),
                evicted = settled.len(),
                "lead form registry full"
            );

            for key in settled {
                forms.remove(&key);
            }
        }

        if forms.len() < self.capacity {
            forms.insert(id.to_owned(), form.clone());
        }

        form
    }

    pub async fn get(&self, id: &str) -> Option<Arc<LeadForm>> {
        self.forms.lock().await.get(id).cloned()
    }

    pub async fn close(&self, id: &str) {
        self.forms.lock().await.remove(id);
    }

    pub async fn len(&self) -> usize {
        self.forms.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
