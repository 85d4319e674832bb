//! 评分徽章组件

use bottle_tracker_shared::WineRating;
use leptos::prelude::*;

#[component]
pub fn RatingBadge(rating: WineRating) -> impl IntoView {
    let class = match rating {
        WineRating::Good => "badge badge-success",
        WineRating::Ok => "badge badge-warning",
        WineRating::Bad => "badge badge-error",
        WineRating::None => "badge badge-ghost",
    };

    view! { <span class=class>{rating.label()}</span> }
}
