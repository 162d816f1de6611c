// Crate entry point. Declare and expose modules so tests and binaries can import them easily.
//
// Responsibilities
// - Only declare and expose modules. No logic here.

pub mod config;

pub mod shared {
    pub mod core {
        pub mod primitives;
    }
    pub mod infrastructure {
        pub mod codec;
        pub mod event_store;
        pub mod subscribers;
    }
}

pub mod modules {
    pub mod tabs {
        pub mod core {
            pub mod events;
            pub mod evolve;
            pub mod state;
        }
        pub mod use_cases {
            pub mod open_tab {
                pub mod command;
                pub mod decide;
                pub mod decision;
                pub mod handler;
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod open_tabs_projection;
            }
        }
    }
}

pub mod shell;
