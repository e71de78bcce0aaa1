use crate::config::FallbackConstants;
use crate::types::NavSnapshot;

/// MSTR NAV per share and premium from current prices.
///
/// Non-positive share counts or NAV yield zero NAV and zero premium.
pub fn compute_nav(btc_price: f64, mstr_price: f64, treasury: &FallbackConstants) -> NavSnapshot {
    let holdings = treasury.mstr_btc_holdings;
    let shares = treasury.mstr_shares_outstanding;

    let btc_per_share = if shares.is_finite() && shares > 0.0 {
        holdings / shares
    } else {
        0.0
    };
    let nav_per_share = btc_per_share * btc_price;

    let premium_pct = if nav_per_share.is_finite() && nav_per_share > 0.0 && mstr_price.is_finite() {
        (mstr_price / nav_per_share - 1.0) * 100.0
    } else {
        0.0
    };

    NavSnapshot {
        btc_price,
        mstr_price,
        btc_holdings: holdings,
        shares_outstanding: shares,
        btc_per_share,
        nav_per_share: if nav_per_share.is_finite() { nav_per_share } else { 0.0 },
        premium_pct,
    }
}
