/// Builds an [`Object`](crate::Object) from literal syntax.
///
/// - `null`, `true`, `false`
/// - `name "Page"` for a name, `ref 4 0` for a reference
/// - `[a, b, ...]` for an array and `{ "Key" => value, ... }` for a dictionary
/// - any other single token tree is passed through `Object::from`; wrap
///   negative numbers and longer expressions in parentheses
///
/// ```rust
/// use pdf_graph::{pdf, Name, Object, Reference};
///
/// let rotation = 90;
/// let page = pdf!({
///     "Type" => name "Page",
///     "Parent" => ref 3 0,
///     "MediaBox" => [0, 0, 612, 792],
///     "Rotate" => rotation,
///     "UserUnit" => (-1.5),
/// });
/// let dict = page.as_dict().unwrap();
/// assert_eq!(dict.get("Type"), Some(&Object::Name(Name::new("Page"))));
/// assert_eq!(dict.get("Parent"), Some(&Object::Reference(Reference::new(3, 0))));
/// assert_eq!(dict.get("Rotate").and_then(Object::as_i64), Some(90));
/// ```
#[macro_export]
macro_rules! pdf {
    (null) => {
        $crate::Object::Null
    };

    (true) => {
        $crate::Object::Boolean(true)
    };

    (false) => {
        $crate::Object::Boolean(false)
    };

    (name $n:literal) => {
        $crate::Object::Name($crate::Name::new($n))
    };

    (ref $number:literal $generation:literal) => {
        $crate::Object::Reference($crate::Reference::new($number, $generation))
    };

    ([]) => {
        $crate::Object::Array(::std::vec::Vec::new())
    };

    ([ $($elems:tt)+ ]) => {{
        let mut array = ::std::vec::Vec::new();
        $crate::pdf!(@array array $($elems)+);
        $crate::Object::Array(array)
    }};

    ({}) => {
        $crate::Object::Dictionary($crate::Dictionary::new())
    };

    ({ $($entries:tt)+ }) => {{
        let mut dict = $crate::Dictionary::new();
        $crate::pdf!(@dict dict $($entries)+);
        $crate::Object::Dictionary(dict)
    }};

    // Array elements, one at a time.
    (@array $array:ident) => {};

    (@array $array:ident name $n:literal $(, $($rest:tt)*)?) => {
        $array.push($crate::pdf!(name $n));
        $crate::pdf!(@array $array $($($rest)*)?);
    };

    (@array $array:ident ref $number:literal $generation:literal $(, $($rest:tt)*)?) => {
        $array.push($crate::pdf!(ref $number $generation));
        $crate::pdf!(@array $array $($($rest)*)?);
    };

    (@array $array:ident $elem:tt $(, $($rest:tt)*)?) => {
        $array.push($crate::pdf!($elem));
        $crate::pdf!(@array $array $($($rest)*)?);
    };

    // Dictionary entries, one at a time.
    (@dict $dict:ident) => {};

    (@dict $dict:ident $key:literal => name $n:literal $(, $($rest:tt)*)?) => {
        $dict.insert($key, $crate::pdf!(name $n));
        $crate::pdf!(@dict $dict $($($rest)*)?);
    };

    (@dict $dict:ident $key:literal => ref $number:literal $generation:literal $(, $($rest:tt)*)?) => {
        $dict.insert($key, $crate::pdf!(ref $number $generation));
        $crate::pdf!(@dict $dict $($($rest)*)?);
    };

    (@dict $dict:ident $key:literal => $value:tt $(, $($rest:tt)*)?) => {
        $dict.insert($key, $crate::pdf!($value));
        $crate::pdf!(@dict $dict $($($rest)*)?);
    };

    ($other:expr) => {
        $crate::Object::from($other)
    };
}
