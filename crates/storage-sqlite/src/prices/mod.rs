mod repository;

pub use repository::PriceRepository;
