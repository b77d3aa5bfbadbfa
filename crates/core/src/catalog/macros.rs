//! Feature-check registration macro.

/// Defines a feature check and submits it to the built-in catalog.
///
/// # Example
///
/// ```ignore
/// feature_test!(accent_color, "accent-color", "The accent-color property", |host| {
///     host.supports("accent-color: red")
/// });
/// ```
#[macro_export]
macro_rules! feature_test {
	($name:ident, $id:literal, $desc:expr, |$host:ident| $body:expr) => {
		$crate::__private::paste::paste! {
			#[allow(unused_variables)]
			fn [<feature_check_ $name>]($host: &mut dyn $crate::Host) -> bool {
				$body
			}

			#[allow(non_upper_case_globals)]
			pub static [<FEATURE_TEST_ $name>]: $crate::catalog::FeatureTestDef =
				$crate::catalog::FeatureTestDef {
					id: $id,
					description: $desc,
					check: [<feature_check_ $name>],
					source: env!("CARGO_PKG_NAME"),
				};

			$crate::__private::inventory::submit! {
				$crate::catalog::FeatureTestReg(&[<FEATURE_TEST_ $name>])
			}
		}
	};
}
