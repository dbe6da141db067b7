//! Translation worker - Single-owner thread for the translation facade
//!
//! The worker owns the [`Translator`] and processes requests one at a time,
//! so the cache is never read and written concurrently. Callers get a
//! receiver per request and decide themselves whether to block on it.

use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use tracing::{debug, error};

use crate::translate::facade::{Translation, TranslationRequest, Translator};
use crate::translate::provider::TranslationProvider;
use crate::translate::TranslateError;

/// Outcome delivered for each submitted request
pub type Reply = Result<Translation, TranslateError>;

struct Job {
    request: TranslationRequest,
    reply: Sender<Reply>,
}

/// Handle to a background translation thread
pub struct TranslationWorker<P: TranslationProvider + 'static> {
    sender: Option<Sender<Job>>,
    handle: Option<JoinHandle<Translator<P>>>,
}

impl<P: TranslationProvider + 'static> TranslationWorker<P> {
    /// Move the translator onto a dedicated thread
    pub fn spawn(translator: Translator<P>) -> io::Result<Self> {
        let (sender, receiver) = mpsc::channel::<Job>();
        let handle = thread::Builder::new()
            .name("translation-worker".to_string())
            .spawn(move || {
                let mut translator = translator;
                for job in receiver {
                    let reply = translator.translate_request(&job.request);
                    // The caller may have stopped waiting
                    let _ = job.reply.send(reply);
                }
                debug!("translation worker drained");
                translator
            })?;

        Ok(Self {
            sender: Some(sender),
            handle: Some(handle),
        })
    }

    /// Queue a request; the result arrives on the returned receiver
    pub fn submit(&self, request: TranslationRequest) -> Receiver<Reply> {
        let (reply, receiver) = mpsc::channel();
        let job = Job { request, reply };

        let undelivered = match &self.sender {
            Some(sender) => sender.send(job).err().map(|e| e.0),
            None => Some(job),
        };
        if let Some(job) = undelivered {
            let _ = job.reply.send(Err(TranslateError::WorkerGone));
        }

        receiver
    }

    /// Finish queued work, stop the thread and hand the translator back
    pub fn shutdown(mut self) -> Option<Translator<P>> {
        self.stop()
    }

    fn stop(&mut self) -> Option<Translator<P>> {
        drop(self.sender.take());
        let handle = self.handle.take()?;
        match handle.join() {
            Ok(translator) => Some(translator),
            Err(_) => {
                error!("translation worker panicked");
                None
            }
        }
    }
}

impl<P: TranslationProvider + 'static> Drop for TranslationWorker<P> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheKey, CacheStore};
    use crate::core::model::Origin;
    use crate::translate::facade::tests::MockProvider;
    use crate::translate::provider::ProviderError;
    use std::sync::atomic::Ordering;
    use tempfile::tempdir;

    #[test]
    fn test_submit_and_collect() {
        let temp = tempdir().unwrap();
        let provider = MockProvider::replying("Hola");
        let calls = provider.calls.clone();
        let translator = Translator::new(CacheStore::load(temp.path()).unwrap(), provider);
        let worker = TranslationWorker::spawn(translator).unwrap();

        // Queue everything before waiting on anything
        let receivers: Vec<_> = ["Hello", "Hello", "Good night"]
            .iter()
            .map(|text| worker.submit(TranslationRequest::new(*text, "en", "es")))
            .collect();
        let origins: Vec<_> = receivers
            .into_iter()
            .map(|rx| rx.recv().unwrap().unwrap().origin)
            .collect();

        assert_eq!(
            origins,
            vec![Origin::Provider, Origin::Cache, Origin::Provider]
        );
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        let translator = worker.shutdown().unwrap();
        assert_eq!(translator.cache().len(), 2);
    }

    #[test]
    fn test_errors_are_delivered() {
        let temp = tempdir().unwrap();
        let translator = Translator::new(
            CacheStore::load(temp.path()).unwrap(),
            MockProvider::failing(ProviderError::Network("offline".into())),
        );
        let worker = TranslationWorker::spawn(translator).unwrap();

        let err = worker
            .submit(TranslationRequest::new("Hello", "en", "es"))
            .recv()
            .unwrap()
            .unwrap_err();
        assert!(matches!(err, TranslateError::Failed(ProviderError::Network(_))));

        let err = worker
            .submit(TranslationRequest::new("Hello", "en", "nope"))
            .recv()
            .unwrap()
            .unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_concurrent_callers_share_one_cache() {
        let temp = tempdir().unwrap();
        let provider = MockProvider::replying("Bonjour");
        let calls = provider.calls.clone();
        let translator = Translator::new(CacheStore::load(temp.path()).unwrap(), provider);
        let worker = TranslationWorker::spawn(translator).unwrap();

        thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    let result = worker
                        .submit(TranslationRequest::new("Hello", "en", "fr"))
                        .recv()
                        .unwrap()
                        .unwrap();
                    assert_eq!(result.text, "Bonjour");
                });
            }
        });

        // Serialized: only the first request reaches the provider
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let translator = worker.shutdown().unwrap();
        assert_eq!(
            translator.cache().get(&CacheKey::new("Hello", "en", "fr")),
            Some("Bonjour")
        );
    }

    #[test]
    fn test_drop_joins_thread_and_keeps_cache_on_disk() {
        let temp = tempdir().unwrap();
        {
            let translator = Translator::new(
                CacheStore::load(temp.path()).unwrap(),
                MockProvider::replying("Hallo"),
            );
            let worker = TranslationWorker::spawn(translator).unwrap();
            let _pending = worker.submit(TranslationRequest::new("Hello", "en", "de"));
        }

        let store = CacheStore::load(temp.path()).unwrap();
        assert_eq!(
            store.get(&CacheKey::new("Hello", "en", "de")),
            Some("Hallo")
        );
    }
}
