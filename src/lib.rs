pub mod app;

pub mod common {
    pub mod clock;
    pub mod config;
    pub mod error;
    pub mod event;
    pub mod money;
    pub mod outcome;
}

pub mod domain {
    pub mod bonus;
    pub mod ledger;
    pub mod transaction;
}

pub mod io {
    pub mod reader;
    pub mod snapshot;
    pub mod store;
    pub mod writer;
}

pub mod worker {
    pub mod engine;
    pub mod session;

    pub mod handlers {
        pub mod deposit;
        pub mod edit;
        pub mod withdrawal;
    }
}
