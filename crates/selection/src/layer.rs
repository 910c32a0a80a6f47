//! Base tile layers.
//!
//! Tiles come from the GSI (国土地理院) XYZ endpoints. The standard layer
//! keeps its historical `blank` tile slug, which is also accepted as an
//! alias when parsing.

/// Tile source attribution, shown by the map renderer.
pub const ATTRIBUTION: &str =
    "© <a href=\"https://maps.gsi.go.jp/development/ichiran.html\">国土地理院</a>";

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum BaseLayer {
    #[default]
    Standard,
    Pale,
    Photo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerError {
    Unrecognized(String),
}

impl std::fmt::Display for LayerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerError::Unrecognized(id) => write!(f, "unrecognized base layer id: {id}"),
        }
    }
}

impl std::error::Error for LayerError {}

impl BaseLayer {
    pub const ALL: [BaseLayer; 3] = [BaseLayer::Standard, BaseLayer::Pale, BaseLayer::Photo];

    /// Canonical identifier, used in snapshot payloads.
    pub fn id(self) -> &'static str {
        match self {
            BaseLayer::Standard => "standard",
            BaseLayer::Pale => "pale",
            BaseLayer::Photo => "photo",
        }
    }

    /// Parses a layer identifier. `blank` is accepted as an alias of
    /// `standard`; anything else is a configuration error.
    pub fn parse(id: &str) -> Result<Self, LayerError> {
        match id {
            "standard" | "blank" => Ok(BaseLayer::Standard),
            "pale" => Ok(BaseLayer::Pale),
            "photo" => Ok(BaseLayer::Photo),
            other => Err(LayerError::Unrecognized(other.to_string())),
        }
    }

    pub fn max_zoom(self) -> u8 {
        match self {
            BaseLayer::Standard => 13,
            BaseLayer::Pale | BaseLayer::Photo => 18,
        }
    }

    pub fn min_zoom(self) -> u8 {
        6
    }

    pub fn tile_url_template(self) -> &'static str {
        match self {
            BaseLayer::Standard => "https://cyberjapandata.gsi.go.jp/xyz/blank/{z}/{x}/{y}.png",
            BaseLayer::Pale => "https://cyberjapandata.gsi.go.jp/xyz/pale/{z}/{x}/{y}.png",
            BaseLayer::Photo => {
                "https://cyberjapandata.gsi.go.jp/xyz/seamlessphoto/{z}/{x}/{y}.jpg"
            }
        }
    }
}

impl std::str::FromStr for BaseLayer {
    type Err = LayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BaseLayer::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::{BaseLayer, LayerError};

    #[test]
    fn ids_round_trip_through_parse() {
        for layer in BaseLayer::ALL {
            assert_eq!(BaseLayer::parse(layer.id()), Ok(layer));
        }
    }

    #[test]
    fn blank_is_an_alias_of_standard() {
        assert_eq!(BaseLayer::parse("blank"), Ok(BaseLayer::Standard));
        assert_eq!(BaseLayer::Standard.id(), "standard");
    }

    #[test]
    fn unknown_id_is_a_configuration_error() {
        let err = BaseLayer::parse("sepia").unwrap_err();
        assert_eq!(err, LayerError::Unrecognized("sepia".to_string()));
    }

    #[test]
    fn zoom_limits_per_layer() {
        assert_eq!(BaseLayer::Standard.max_zoom(), 13);
        assert_eq!(BaseLayer::Pale.max_zoom(), 18);
        assert_eq!(BaseLayer::Photo.max_zoom(), 18);
        for layer in BaseLayer::ALL {
            assert_eq!(layer.min_zoom(), 6);
        }
    }

    #[test]
    fn default_layer_is_standard() {
        assert_eq!(BaseLayer::default(), BaseLayer::Standard);
    }
}
