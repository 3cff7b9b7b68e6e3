/// Web presence of a market. All links are optional free-form strings
/// as imported from the source dataset.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarketLinks {
    pub website     : Option<String>,
    pub facebook    : Option<String>,
    pub twitter     : Option<String>,
    pub youtube     : Option<String>,
    pub other_media : Option<String>,
}

impl MarketLinks {
    pub fn is_empty(&self) -> bool {
        self.website.is_none()
            && self.facebook.is_none()
            && self.twitter.is_none()
            && self.youtube.is_none()
            && self.other_media.is_none()
    }
}
