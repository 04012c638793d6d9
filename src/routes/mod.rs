pub mod auth {
    pub mod dto;
    pub mod route;
    pub use route::create_route;
}

pub mod certificates {
    pub mod dto;
    pub mod route;
    pub use route::create_route;
}

pub mod collaborations {
    pub mod dto;
    pub mod route;
    pub use route::create_route;
}

pub mod health {
    pub mod route;
    pub use route::create_route;
}

pub mod scholars {
    pub mod dto;
    pub mod route;
    pub use route::create_route;
}

pub mod stats {
    pub mod dto;
    pub mod route;
    pub use route::create_route;
}

pub mod users {
    pub mod dto;
    pub mod route;
    pub use route::create_route;
}
