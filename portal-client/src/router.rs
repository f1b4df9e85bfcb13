//! Known portal routes and the navigation side effect used by the session machinery

use std::sync::Mutex;

use portal_common::catalog::ServiceCategory;

/// Pages of the booking portal that the client core navigates to or guards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Login,
    Register,
    UserDashboard,
    AdminDashboard,
    Services(ServiceCategory),
    Booking,
    Payment,
    AdminServices,
    AdminTransactions,
}

impl Page {
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::UserDashboard => "/user/dashboard",
            Self::AdminDashboard => "/admin/dashboard",
            Self::Services(ServiceCategory::Bengkel) => "/layanan/bengkel",
            Self::Services(ServiceCategory::Psikologi) => "/layanan/psikologi",
            Self::Services(ServiceCategory::OpoWae) => "/layanan/opo-wae",
            Self::Booking => "/user/booking",
            Self::Payment => "/user/payment",
            Self::AdminServices => "/admin/layanan",
            Self::AdminTransactions => "/admin/transaksi",
        }
    }
}

/// Receiver of forced navigations. A browser shell would change the window location; headless
/// callers can use [History].
pub trait Navigator: Send + Sync {
    /// Path currently displayed, if the navigator tracks one
    fn current(&self) -> Option<String>;
    /// Move to `page`
    fn navigate(&self, page: Page);
}

/// In-process navigation history
#[derive(Debug, Default)]
pub struct History {
    entries: Mutex<Vec<String>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history whose current location is `page`
    pub fn starting_at(page: Page) -> Self {
        Self {
            entries: Mutex::new(vec![page.path().to_owned()]),
        }
    }

    /// All visited paths, oldest first
    pub fn entries(&self) -> Vec<String> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of times `page` was navigated to
    pub fn visits(&self, page: Page) -> usize {
        self.entries()
            .iter()
            .filter(|path| path.as_str() == page.path())
            .count()
    }
}

impl Navigator for History {
    fn current(&self) -> Option<String> {
        self.entries().last().cloned()
    }

    fn navigate(&self, page: Page) {
        log::info!("Navigating to {}", page.path());
        match self.entries.lock() {
            Ok(mut entries) => entries.push(page.path().to_owned()),
            Err(poisoned) => poisoned.into_inner().push(page.path().to_owned()),
        }
    }
}
