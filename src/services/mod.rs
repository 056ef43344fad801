pub mod components;
pub mod toast;

use components::{BasicComponents, ComponentLibrary};
use toast::ToastService;

/// Capabilities the shell registers once and every view reaches through the context.
pub struct Services {
    pub toasts: ToastService,
    pub components: Box<dyn ComponentLibrary>,
}

impl Services {
    pub fn new(components: Box<dyn ComponentLibrary>) -> Services {
        Services {
            toasts: ToastService::new(),
            components,
        }
    }
}

impl Default for Services {
    fn default() -> Self {
        Services::new(Box::new(BasicComponents))
    }
}
