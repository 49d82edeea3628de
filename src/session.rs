// SPDX-License-Identifier: MPL-2.0

//! State machine tying a loaded image to its spectrum.
//!
//! A [`Session`] goes through `Empty → Loaded → Transformed → Reconstructed`.
//! Each state is its own type, so a forward transform without an image
//! or a reconstruction without a spectrum cannot be written.
//! Loading a new image is allowed from any state and drops the old spectrum.
//!
//! [`DynSession`] wraps the four states in one enum for hosts that keep
//! the session in a mutable field, and reports wrong-phase requests
//! as [`Error::Precondition`].

use std::fmt;

use image::GrayImage;

use crate::complex::{forward_transform, ComplexImage};
use crate::encode::{encode, OutputFormat};
use crate::error::{ensure_non_empty, Error, Result};
use crate::magnitude::{magnitude_spectrum_with, VisualizeOptions};
use crate::pad;
use crate::reconstruct::reconstruct;

/// Settings shared by every step of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Constant used for the padding border.
    pub fill: u8,

    /// How the magnitude spectrum is rendered.
    pub visualize: VisualizeOptions,

    /// Encoding of the images handed to the display.
    pub format: OutputFormat,
}

/// Where a session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No image loaded.
    Empty,
    /// An image is loaded, no spectrum yet.
    Loaded,
    /// The spectrum of the loaded image is stored.
    Transformed,
    /// The stored spectrum has been inverted.
    Reconstructed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Loaded => "loaded",
            Self::Transformed => "transformed",
            Self::Reconstructed => "reconstructed",
        };
        f.write_str(name)
    }
}

/// Requests a host may offer in a given phase, e.g. as enabled buttons.
/// Loading an image is always possible and is not listed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Actions {
    /// A forward transform can be requested.
    pub transform: bool,
    /// An inverse transform can be requested.
    pub antitransform: bool,
}

impl Phase {
    /// Requests available in this phase.
    pub fn actions(self) -> Actions {
        Actions {
            transform: self == Self::Loaded,
            antitransform: self == Self::Transformed,
        }
    }
}

/// State of a session, one type per [`Phase`].
pub trait State: sealed::Sealed {
    /// Phase this state stands for.
    const PHASE: Phase;
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Empty {}
    impl Sealed for super::Loaded {}
    impl Sealed for super::Transformed {}
    impl Sealed for super::Reconstructed {}
}

/// No image yet.
#[derive(Debug, Clone)]
pub struct Empty;

/// An image is loaded and can be transformed.
#[derive(Debug, Clone)]
pub struct Loaded {
    image: GrayImage,
}

/// The spectrum of the loaded image is available.
#[derive(Debug, Clone)]
pub struct Transformed {
    image: GrayImage,
    padded: GrayImage,
    spectrum: ComplexImage,
}

/// The spectrum has been inverted in place.
#[derive(Debug, Clone)]
pub struct Reconstructed {
    image: GrayImage,
    padded: GrayImage,
    spectrum: ComplexImage,
}

impl State for Empty {
    const PHASE: Phase = Phase::Empty;
}
impl State for Loaded {
    const PHASE: Phase = Phase::Loaded;
}
impl State for Transformed {
    const PHASE: Phase = Phase::Transformed;
}
impl State for Reconstructed {
    const PHASE: Phase = Phase::Reconstructed;
}

/// A transform session in state `S`.
#[derive(Debug, Clone)]
pub struct Session<S: State> {
    config: SessionConfig,
    state: S,
}

impl Session<Empty> {
    /// New empty session with the default configuration.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// New empty session.
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            config,
            state: Empty,
        }
    }
}

impl Default for Session<Empty> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> Session<S> {
    /// Current phase.
    pub fn phase(&self) -> Phase {
        S::PHASE
    }

    /// Requests available in the current phase.
    pub fn actions(&self) -> Actions {
        S::PHASE.actions()
    }

    /// Settings of this session.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Load a new image, dropping whatever the session held.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the image has no pixels.
    pub fn load(self, image: GrayImage) -> Result<Session<Loaded>> {
        ensure_non_empty(image.width(), image.height())?;
        tracing::debug!(
            "session {} -> loaded with a {}x{} image",
            S::PHASE,
            image.width(),
            image.height()
        );
        Ok(Session {
            config: self.config,
            state: Loaded { image },
        })
    }
}

impl Session<Loaded> {
    /// The loaded image.
    pub fn image(&self) -> &GrayImage {
        &self.state.image
    }

    /// Pad the image, compute its DFT and keep it.
    ///
    /// Returns the next session and the magnitude spectrum to display.
    pub fn transform(self) -> (Session<Transformed>, GrayImage) {
        let Loaded { image } = self.state;
        // Loading already rejected empty images.
        let padded = pad::extend(&image, self.config.fill);
        let spectrum = forward_transform(&padded);
        let display = magnitude_spectrum_with(&spectrum, &self.config.visualize);
        tracing::debug!("session loaded -> transformed");
        let session = Session {
            config: self.config,
            state: Transformed {
                image,
                padded,
                spectrum,
            },
        };
        (session, display)
    }
}

impl Session<Transformed> {
    /// Back to the loaded phase with the same image.
    pub(crate) fn rewind(self) -> Session<Loaded> {
        Session {
            config: self.config,
            state: Loaded {
                image: self.state.image,
            },
        }
    }

    /// The loaded image.
    pub fn image(&self) -> &GrayImage {
        &self.state.image
    }

    /// The image as it was transformed, after padding.
    pub fn padded(&self) -> &GrayImage {
        &self.state.padded
    }

    /// The spectrum of the padded image.
    pub fn spectrum(&self) -> &ComplexImage {
        &self.state.spectrum
    }

    /// Invert the stored spectrum in place.
    ///
    /// Returns the next session and the restored image to display.
    pub fn antitransform(self) -> (Session<Reconstructed>, GrayImage) {
        let Transformed {
            image,
            padded,
            mut spectrum,
        } = self.state;
        let restored = reconstruct(&mut spectrum);
        tracing::debug!("session transformed -> reconstructed");
        let session = Session {
            config: self.config,
            state: Reconstructed {
                image,
                padded,
                spectrum,
            },
        };
        (session, restored)
    }
}

impl Session<Reconstructed> {
    /// Back to the loaded phase with the same image.
    pub(crate) fn rewind(self) -> Session<Loaded> {
        Session {
            config: self.config,
            state: Loaded {
                image: self.state.image,
            },
        }
    }

    /// The loaded image.
    pub fn image(&self) -> &GrayImage {
        &self.state.image
    }

    /// The image as it was transformed, after padding.
    pub fn padded(&self) -> &GrayImage {
        &self.state.padded
    }

    /// The inverted spectrum, its real plane is the unnormalized restored image.
    pub fn spectrum(&self) -> &ComplexImage {
        &self.state.spectrum
    }
}

/// Image produced by a session step, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    /// Decoded pixels.
    pub image: GrayImage,
    /// Format of `bytes`.
    pub format: OutputFormat,
    /// Encoded image.
    pub bytes: Vec<u8>,
}

impl Output {
    fn new<E>(image: GrayImage, format: OutputFormat, encoder: E) -> Result<Self>
    where
        E: FnOnce(&GrayImage, OutputFormat) -> Result<Vec<u8>>,
    {
        let bytes = encoder(&image, format)?;
        Ok(Self {
            image,
            format,
            bytes,
        })
    }
}

/// A session whose phase is only known at runtime.
#[derive(Debug, Clone)]
pub enum DynSession {
    /// No image loaded.
    Empty(Session<Empty>),
    /// An image is loaded, no spectrum yet.
    Loaded(Session<Loaded>),
    /// The spectrum of the loaded image is stored.
    Transformed(Session<Transformed>),
    /// The stored spectrum has been inverted.
    Reconstructed(Session<Reconstructed>),
}

impl Default for DynSession {
    fn default() -> Self {
        Self::Empty(Session::new())
    }
}

impl DynSession {
    /// New empty session.
    pub fn new(config: SessionConfig) -> Self {
        Self::Empty(Session::with_config(config))
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        match self {
            Self::Empty(s) => s.phase(),
            Self::Loaded(s) => s.phase(),
            Self::Transformed(s) => s.phase(),
            Self::Reconstructed(s) => s.phase(),
        }
    }

    /// Requests available in the current phase.
    pub fn actions(&self) -> Actions {
        self.phase().actions()
    }

    /// Settings of this session.
    pub fn config(&self) -> &SessionConfig {
        match self {
            Self::Empty(s) => s.config(),
            Self::Loaded(s) => s.config(),
            Self::Transformed(s) => s.config(),
            Self::Reconstructed(s) => s.config(),
        }
    }

    /// The loaded image, if any.
    pub fn image(&self) -> Option<&GrayImage> {
        match self {
            Self::Empty(_) => None,
            Self::Loaded(s) => Some(s.image()),
            Self::Transformed(s) => Some(s.image()),
            Self::Reconstructed(s) => Some(s.image()),
        }
    }

    /// Load a new image from any phase.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the image has no pixels,
    /// in which case the session is left as it was.
    pub fn load(&mut self, image: GrayImage) -> Result<()> {
        ensure_non_empty(image.width(), image.height())?;
        let loaded = match self.take() {
            Self::Empty(s) => s.load(image),
            Self::Loaded(s) => s.load(image),
            Self::Transformed(s) => s.load(image),
            Self::Reconstructed(s) => s.load(image),
        }?;
        *self = Self::Loaded(loaded);
        Ok(())
    }

    /// Forward transform the loaded image.
    ///
    /// The session only moves on once the spectrum is encoded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Precondition`] unless the session is [`Phase::Loaded`],
    /// or [`Error::Encode`] if the spectrum cannot be encoded,
    /// in which case the session stays loaded.
    pub fn transform(&mut self) -> Result<Output> {
        self.transform_with(encode)
    }

    fn transform_with<E>(&mut self, encoder: E) -> Result<Output>
    where
        E: FnOnce(&GrayImage, OutputFormat) -> Result<Vec<u8>>,
    {
        let format = self.config().format;
        match self.take() {
            Self::Loaded(s) => {
                let (next, display) = s.transform();
                match Output::new(display, format, encoder) {
                    Ok(output) => {
                        *self = Self::Transformed(next);
                        Ok(output)
                    }
                    Err(err) => {
                        tracing::warn!("spectrum not published, session stays loaded: {err}");
                        *self = Self::Loaded(next.rewind());
                        Err(err)
                    }
                }
            }
            other => {
                let phase = other.phase();
                *self = other;
                Err(Error::Precondition {
                    operation: "transform",
                    phase,
                })
            }
        }
    }

    /// Inverse transform the stored spectrum.
    ///
    /// The session only moves on once the restored image is encoded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Precondition`] unless the session is [`Phase::Transformed`],
    /// or [`Error::Encode`] if the restored image cannot be encoded,
    /// in which case the session stays transformed.
    pub fn antitransform(&mut self) -> Result<Output> {
        self.antitransform_with(encode)
    }

    fn antitransform_with<E>(&mut self, encoder: E) -> Result<Output>
    where
        E: FnOnce(&GrayImage, OutputFormat) -> Result<Vec<u8>>,
    {
        let format = self.config().format;
        match self.take() {
            Self::Transformed(s) => {
                let (next, restored) = s.antitransform();
                match Output::new(restored, format, encoder) {
                    Ok(output) => {
                        *self = Self::Reconstructed(next);
                        Ok(output)
                    }
                    Err(err) => {
                        tracing::warn!("restored image not published, session stays transformed: {err}");
                        // The spectrum was inverted in place, transforming the image again
                        // gives back the same one.
                        let (transformed, _) = next.rewind().transform();
                        *self = Self::Transformed(transformed);
                        Err(err)
                    }
                }
            }
            other => {
                let phase = other.phase();
                *self = other;
                Err(Error::Precondition {
                    operation: "antitransform",
                    phase,
                })
            }
        }
    }

    /// Move the session out, leaving an empty one with the same config.
    fn take(&mut self) -> Self {
        let config = *self.config();
        std::mem::replace(self, Self::new(config))
    }
}

impl From<Session<Empty>> for DynSession {
    fn from(session: Session<Empty>) -> Self {
        Self::Empty(session)
    }
}

impl From<Session<Loaded>> for DynSession {
    fn from(session: Session<Loaded>) -> Self {
        Self::Loaded(session)
    }
}

impl From<Session<Transformed>> for DynSession {
    fn from(session: Session<Transformed>) -> Self {
        Self::Transformed(session)
    }
}

impl From<Session<Reconstructed>> for DynSession {
    fn from(session: Session<Reconstructed>) -> Self {
        Self::Reconstructed(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn gradient(width: u32, height: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| Luma([(x * 13 + y * 7) as u8]))
    }

    #[test]
    fn test_typed_lifecycle() {
        let session = Session::new();
        assert_eq!(session.phase(), Phase::Empty);
        assert_eq!(session.actions(), Actions::default());

        let session = session.load(gradient(7, 9)).unwrap();
        assert_eq!(session.phase(), Phase::Loaded);
        assert!(session.actions().transform);
        assert!(!session.actions().antitransform);

        let (session, spectrum) = session.transform();
        assert_eq!(session.phase(), Phase::Transformed);
        assert_eq!(session.padded().dimensions(), (8, 9));
        assert_eq!(session.spectrum().dimensions(), (8, 9));
        // Odd height keeps its trailing row.
        assert_eq!(spectrum.dimensions(), (8, 9));
        assert_eq!(
            session.actions(),
            Actions {
                transform: false,
                antitransform: true
            }
        );

        let (session, restored) = session.antitransform();
        assert_eq!(session.phase(), Phase::Reconstructed);
        assert_eq!(restored.dimensions(), (8, 9));
        assert_eq!(session.actions(), Actions::default());
        assert_eq!(session.image().dimensions(), (7, 9));

        let session = session.load(gradient(4, 4)).unwrap();
        assert_eq!(session.phase(), Phase::Loaded);
        assert_eq!(session.image().dimensions(), (4, 4));
    }

    #[test]
    fn test_load_rejects_empty_image() {
        assert!(matches!(
            Session::new().load(GrayImage::new(3, 0)),
            Err(Error::InvalidDimensions { width: 3, height: 0 })
        ));
    }

    #[test]
    fn test_fill_value_is_used_for_padding() {
        let config = SessionConfig {
            fill: 50,
            ..SessionConfig::default()
        };
        let session = Session::with_config(config).load(gradient(7, 8)).unwrap();
        let (session, _) = session.transform();
        assert_eq!(session.padded().get_pixel(7, 3)[0], 50);
    }

    #[test]
    fn test_dyn_session_preconditions() {
        let mut session = DynSession::default();
        assert!(matches!(
            session.transform(),
            Err(Error::Precondition {
                operation: "transform",
                phase: Phase::Empty
            })
        ));
        assert!(matches!(
            session.antitransform(),
            Err(Error::Precondition {
                operation: "antitransform",
                phase: Phase::Empty
            })
        ));

        session.load(gradient(6, 6)).unwrap();
        assert!(matches!(
            session.antitransform(),
            Err(Error::Precondition { phase: Phase::Loaded, .. })
        ));
        assert_eq!(session.phase(), Phase::Loaded);

        let spectrum = session.transform().unwrap();
        assert_eq!(spectrum.format, OutputFormat::Png);
        assert_eq!(spectrum.image.dimensions(), (6, 6));
        assert!(!spectrum.bytes.is_empty());
        assert!(session.transform().is_err());
        assert_eq!(session.phase(), Phase::Transformed);

        let restored = session.antitransform().unwrap();
        assert_eq!(restored.image.dimensions(), (6, 6));
        assert!(matches!(
            session.antitransform(),
            Err(Error::Precondition {
                phase: Phase::Reconstructed,
                ..
            })
        ));

        session.load(gradient(3, 3)).unwrap();
        assert!(session.actions().transform);
    }

    #[test]
    fn test_dyn_session_failed_load_keeps_state() {
        let mut session = DynSession::default();
        session.load(gradient(4, 4)).unwrap();
        session.transform().unwrap();
        assert!(session.load(GrayImage::new(0, 0)).is_err());
        assert_eq!(session.phase(), Phase::Transformed);
    }

    #[test]
    fn test_session_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Session<Transformed>>();
        assert_send::<DynSession>();

        let session = Session::new().load(gradient(5, 5)).unwrap();
        let handle = std::thread::spawn(move || session.transform());
        let (session, spectrum) = handle.join().unwrap();
        assert_eq!(session.phase(), Phase::Transformed);
        assert_eq!(spectrum.dimensions(), (5, 5));
    }

    #[test]
    fn test_thin_images_go_through_the_session() {
        for (width, height) in [(1, 8), (8, 1), (1, 7), (1, 1)] {
            let session = Session::new().load(gradient(width, height)).unwrap();
            let (session, spectrum) = session.transform();
            let padded = session.padded().dimensions();
            assert_eq!(spectrum.dimensions(), padded);
            let (_, restored) = session.antitransform();
            assert_eq!(restored.dimensions(), padded);

            let mut session = DynSession::default();
            session.load(gradient(width, height)).unwrap();
            let spectrum = session.transform().unwrap();
            assert_eq!(spectrum.image.dimensions(), padded);
            assert_eq!(session.phase(), Phase::Transformed);
            let restored = session.antitransform().unwrap();
            assert_eq!(restored.image.dimensions(), padded);
            assert_eq!(session.phase(), Phase::Reconstructed);
        }
    }

    fn failing_encoder(_: &GrayImage, _: OutputFormat) -> Result<Vec<u8>> {
        Err(Error::Encode(image::ImageError::Limits(
            image::error::LimitError::from_kind(image::error::LimitErrorKind::DimensionError),
        )))
    }

    #[test]
    fn test_failed_spectrum_encoding_keeps_session_loaded() {
        let mut session = DynSession::default();
        session.load(gradient(8, 6)).unwrap();
        assert!(matches!(
            session.transform_with(failing_encoder),
            Err(Error::Encode(_))
        ));
        assert_eq!(session.phase(), Phase::Loaded);
        assert!(session.actions().transform);
        assert_eq!(session.image().map(|i| i.dimensions()), Some((8, 6)));

        let spectrum = session.transform().unwrap();
        assert_eq!(spectrum.image.dimensions(), (8, 6));
        assert_eq!(session.phase(), Phase::Transformed);
    }

    #[test]
    fn test_failed_restored_encoding_keeps_spectrum() {
        let mut session = DynSession::default();
        session.load(gradient(8, 6)).unwrap();
        session.transform().unwrap();
        let before = match &session {
            DynSession::Transformed(s) => s.spectrum().clone(),
            other => panic!("unexpected phase {}", other.phase()),
        };

        assert!(matches!(
            session.antitransform_with(failing_encoder),
            Err(Error::Encode(_))
        ));
        assert_eq!(session.phase(), Phase::Transformed);
        assert!(session.actions().antitransform);
        match &session {
            DynSession::Transformed(s) => assert_eq!(s.spectrum(), &before),
            other => panic!("unexpected phase {}", other.phase()),
        }

        let restored = session.antitransform().unwrap();
        assert_eq!(restored.image.dimensions(), (8, 6));
        assert_eq!(session.phase(), Phase::Reconstructed);
    }
}
