pub mod validator;
pub mod wav;

pub use validator::{validate_audio, Validation, ValidationFailure};
pub use wav::{encode_wav, PcmFormat, WAV_HEADER_SIZE};
