use super::*;

#[test]
fn mime_type_wins() {
    assert_eq!(classify("scan.bin", "application/pdf"), UploadKind::Pdf);
    assert_eq!(classify("scan.pdf", "image/png"), UploadKind::Image);
    assert_eq!(classify("notes.pdf", "text/plain"), UploadKind::Unsupported);
}

#[test]
fn extension_used_without_mime() {
    assert_eq!(classify("Invoice.PDF", ""), UploadKind::Pdf);
    assert_eq!(classify("page.tiff", "application/octet-stream"), UploadKind::Image);
    assert_eq!(classify("README", ""), UploadKind::Unsupported);
}

#[test]
fn content_type_defaults() {
    assert_eq!(upload_content_type(UploadKind::Pdf, ""), "application/pdf");
    assert_eq!(upload_content_type(UploadKind::Image, "image/jpeg"), "image/jpeg");
    assert_eq!(upload_content_type(UploadKind::Image, ""), "application/octet-stream");
}
