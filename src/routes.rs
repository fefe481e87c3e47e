//! Route Table
//!
//! Fixed mapping between URL paths and screens.

/// Every screen reachable by URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Login,
    Users,
    Restaurants,
    Reviews,
    Orders,
    Menu,
    Reports,
}

impl Screen {
    pub const ALL: [Screen; 7] = [
        Screen::Login,
        Screen::Users,
        Screen::Restaurants,
        Screen::Reviews,
        Screen::Orders,
        Screen::Menu,
        Screen::Reports,
    ];

    /// Path segment without the leading slash ("" for the root)
    pub fn segment(&self) -> &'static str {
        match self {
            Screen::Login => "",
            Screen::Users => "usuarios",
            Screen::Restaurants => "restaurantes",
            Screen::Reviews => "resenas",
            Screen::Orders => "ordenes",
            Screen::Menu => "menu",
            Screen::Reports => "reportes",
        }
    }

    pub fn path(&self) -> String {
        format!("/{}", self.segment())
    }

    pub fn label(&self) -> &'static str {
        match self {
            Screen::Login => "Login",
            Screen::Users => "Usuarios",
            Screen::Restaurants => "Restaurantes",
            Screen::Reviews => "Reseñas",
            Screen::Orders => "Órdenes",
            Screen::Menu => "Menú",
            Screen::Reports => "Reportes",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let segment = path.trim_matches('/');
        Self::ALL.into_iter().find(|screen| screen.segment() == segment)
    }

    /// Entries of the navigation menu: everything but login
    pub fn menu() -> impl Iterator<Item = Screen> {
        Self::ALL.into_iter().filter(|screen| *screen != Screen::Login)
    }
}
