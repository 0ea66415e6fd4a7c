//! Storefront Models
//!
//! Entity types shared between the server and its clients. Each resource
//! follows the same shape: the stored entity, a `*Create` payload and a
//! `*Update` payload with optional fields for partial updates.

pub mod blog;
pub mod brand;
pub mod category;
pub mod comment;
pub mod coupon;
pub mod discount;
pub mod order;
pub mod product;
pub mod search;
pub mod showcase;
pub mod user;
pub mod wishlist;

pub use blog::{Article, ArticleCreate, ArticleUpdate};
pub use brand::{Brand, BrandCreate};
pub use category::{Category, CategoryCreate, CategoryUpdate};
pub use comment::{Comment, CommentCreate, CommentWithUser};
pub use coupon::{Coupon, CouponCreate, CouponUpdate};
pub use discount::{DiscountBasket, DiscountBasketCreate, DiscountBasketUpdate};
pub use order::{Order, OrderLine, OrderStatus, OrderWithLines};
pub use product::{FeatureValue, Product, ProductCreate, ProductUpdate, ProductWithBrand};
pub use search::{PopularSearch, SearchHistory};
pub use showcase::{Banner, BannerCreate, Slider, SliderCreate, SliderUpdate};
pub use user::{OtpCode, User, UserUpdate};
pub use wishlist::WishlistEntry;
