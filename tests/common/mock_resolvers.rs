use parking_lot::Mutex;
use refresolve_core::diagnostics::{DiagnosticsSink, ReferenceLocation};
use refresolve_core::error::ResolverFault;
use refresolve_core::models::{ResolverOutcome, ResourceReference, ResultFactory, SessionId};
use refresolve_core::registry::{ResolverLoader, ResourceResolver, StaticResolverLoader};
use refresolve_core::resolution::{ResolutionContext, ResolutionDispatcher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// What a [`ScriptedResolver`] answers with on every call
#[derive(Debug, Clone)]
pub enum Behavior {
    Decline,
    Succeed {
        path: String,
        version: Option<String>,
        warnings: Vec<String>,
    },
    Fail {
        errors: Vec<String>,
        warnings: Vec<String>,
    },
    Fault(String),
    Panic(String),
}

/// Resolver with a fixed answer that records how often it was asked
#[derive(Debug)]
pub struct ScriptedResolver {
    name: String,
    behavior: Behavior,
    calls: AtomicUsize,
}

impl ScriptedResolver {
    pub fn new(name: &str, behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            behavior,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn declining(name: &str) -> Arc<Self> {
        Self::new(name, Behavior::Decline)
    }

    pub fn succeeding(name: &str, path: &str) -> Arc<Self> {
        Self::new(
            name,
            Behavior::Succeed {
                path: path.to_string(),
                version: None,
                warnings: Vec::new(),
            },
        )
    }

    pub fn failing(name: &str, errors: &[&str], warnings: &[&str]) -> Arc<Self> {
        Self::new(
            name,
            Behavior::Fail {
                errors: errors.iter().map(|e| e.to_string()).collect(),
                warnings: warnings.iter().map(|w| w.to_string()).collect(),
            },
        )
    }

    pub fn faulting(name: &str, message: &str) -> Arc<Self> {
        Self::new(name, Behavior::Fault(message.to_string()))
    }

    pub fn panicking(name: &str, message: &str) -> Arc<Self> {
        Self::new(name, Behavior::Panic(message.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ResourceResolver for ScriptedResolver {
    fn name(&self) -> &str {
        &self.name
    }

    fn resolve(
        &self,
        _reference: &ResourceReference,
        _context: &mut ResolutionContext<'_>,
        factory: &ResultFactory,
    ) -> Result<ResolverOutcome, ResolverFault> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Decline => Ok(factory.decline()),
            Behavior::Succeed {
                path,
                version,
                warnings,
            } => Ok(factory.success_with(path.as_str(), version.as_deref(), warnings.clone())),
            Behavior::Fail { errors, warnings } => {
                Ok(factory.failure(errors.clone(), warnings.clone()))
            }
            Behavior::Fault(message) => Err(anyhow::anyhow!(message.clone())),
            Behavior::Panic(message) => panic!("{}", message),
        }
    }
}

/// Per-session counter kept in resolver state
#[derive(Debug, Default)]
pub struct CallCounter {
    pub count: AtomicUsize,
}

/// Stateful resolver: resolves to `/<name>/<n>` where `n` counts its calls
/// within the current session
#[derive(Debug)]
pub struct CountingResolver {
    name: String,
}

impl CountingResolver {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
        })
    }
}

impl ResourceResolver for CountingResolver {
    fn name(&self) -> &str {
        &self.name
    }

    fn resolve(
        &self,
        _reference: &ResourceReference,
        context: &mut ResolutionContext<'_>,
        factory: &ResultFactory,
    ) -> Result<ResolverOutcome, ResolverFault> {
        let counter = context.state_or_insert_with(CallCounter::default);
        let seen = counter.count.fetch_add(1, Ordering::SeqCst) + 1;
        let seen = seen.to_string();
        Ok(factory.success(format!("/{}/{}", self.name, seen), Some(&seen)))
    }
}

/// Stateful resolver that stamps its state with the session id and fails if it
/// is ever handed state stamped by a different session
#[derive(Debug, Default)]
pub struct SessionStampResolver {
    pub mismatches: AtomicUsize,
}

impl ResourceResolver for SessionStampResolver {
    fn name(&self) -> &str {
        "session-stamp"
    }

    fn resolve(
        &self,
        _reference: &ResourceReference,
        context: &mut ResolutionContext<'_>,
        factory: &ResultFactory,
    ) -> Result<ResolverOutcome, ResolverFault> {
        let session = context.session_id();
        let stamp = context.state_or_insert_with(|| session);
        if *stamp != session {
            self.mismatches.fetch_add(1, Ordering::SeqCst);
            return Ok(factory.failure([format!("saw state of {stamp} in {session}")], Vec::<String>::new()));
        }
        Ok(factory.success(format!("/sessions/{}", session.value()), None))
    }
}

/// Loader that hands out a fixed list, optionally slowly, and counts calls
pub struct RecordingLoader {
    resolvers: Vec<Arc<dyn ResourceResolver>>,
    delay: Duration,
    calls: AtomicUsize,
    seen_locations: Mutex<Vec<ReferenceLocation>>,
}

impl RecordingLoader {
    pub fn new(resolvers: Vec<Arc<dyn ResourceResolver>>) -> Self {
        Self {
            resolvers,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            seen_locations: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen_locations(&self) -> Vec<ReferenceLocation> {
        self.seen_locations.lock().clone()
    }
}

impl ResolverLoader for RecordingLoader {
    fn load_resolvers(
        &self,
        _sink: &dyn DiagnosticsSink,
        location: &ReferenceLocation,
    ) -> Result<Vec<Arc<dyn ResourceResolver>>, ResolverFault> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_locations.lock().push(location.clone());
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        Ok(self.resolvers.clone())
    }
}

/// Dispatcher consulting `resolvers` in the given order
pub fn dispatcher_with(resolvers: Vec<Arc<dyn ResourceResolver>>) -> ResolutionDispatcher {
    let mut loader = StaticResolverLoader::new();
    for (position, resolver) in resolvers.into_iter().enumerate() {
        loader.register_with_priority(resolver, position as i32);
    }
    ResolutionDispatcher::new(Arc::new(loader))
}

pub const SESSION_A: SessionId = SessionId::new(1);
pub const SESSION_B: SessionId = SessionId::new(2);
