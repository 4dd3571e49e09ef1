use std::sync::atomic::{AtomicUsize, Ordering};

use solus_utils::Singleton;

#[derive(Debug, Default, Singleton)]
pub struct DemoService {
    calls: AtomicUsize,
}

impl DemoService {
    pub fn do_something(&self) -> usize {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        log::info!("DemoService::do_something, call #{}", call);
        call
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Reaches [`DemoService`] through its static accessor rather than holding it.
pub struct Reporter {
    greeting: String,
}

impl Reporter {
    pub fn new(greeting: String) -> Self {
        Self { greeting }
    }

    pub fn some_method(&self) -> usize {
        log::info!("{} from Reporter", self.greeting);
        DemoService::instance().do_something()
    }
}

#[cfg(test)]
mod tests {
    use solus_utils::Singleton;

    use super::{DemoService, Reporter};

    #[test]
    fn test_call_sites_share_the_service() {
        let reporter = Reporter::new("hi".to_string());
        let before = DemoService::instance().calls();

        reporter.some_method();
        DemoService::instance().do_something();

        assert_eq!(DemoService::instance().calls(), before + 2);
    }
}
